//! Wiring between the CLI and the advice desk.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::runtime::Runtime;

use wagebook_advice::{
    AdviceDesk, AdviceError, AdviceOutcome, AdviceRequest, AdviceService, GeminiClient,
    GeminiConfig,
};

use crate::config::AdviceSettings;

/// Stands in for the real service when it cannot be configured, so a
/// request still ends in the usual fallback text.
struct Unavailable(String);

#[async_trait]
impl AdviceService for Unavailable {
    async fn generate(&self, _prompt: &str) -> Result<String, AdviceError> {
        Err(AdviceError::Config(self.0.clone()))
    }
}

pub struct Advisor {
    desk: Arc<AdviceDesk<dyn AdviceService>>,
    runtime: Runtime,
}

impl Advisor {
    pub fn from_settings(settings: &AdviceSettings) -> Result<Self> {
        let service: Arc<dyn AdviceService> = match gemini_client(settings) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::warn!(error = %e, "advice service unavailable");
                Arc::new(Unavailable(e.to_string()))
            }
        };
        Self::with_service(service)
    }

    pub fn with_service(service: Arc<dyn AdviceService>) -> Result<Self> {
        let runtime = Runtime::new().context("failed to start async runtime")?;
        Ok(Self {
            desk: Arc::new(AdviceDesk::new(service)),
            runtime,
        })
    }

    pub fn is_busy(&self) -> bool {
        self.desk.is_busy()
    }

    /// Request advice and wait for it.
    pub fn ask(&self, request: &AdviceRequest) -> Result<AdviceOutcome, AdviceError> {
        self.runtime.block_on(self.desk.request(request))
    }

    /// Request advice in the background; the outcome is sent on `done`.
    pub fn spawn(&self, request: &AdviceRequest, done: Sender<AdviceOutcome>) -> Result<(), AdviceError> {
        let pending = self.desk.begin(request)?;
        let desk = Arc::clone(&self.desk);
        self.runtime.spawn(async move {
            let outcome = desk.complete(pending).await;
            // The receiver is gone only if the session already ended.
            let _ = done.send(outcome);
        });
        Ok(())
    }
}

fn gemini_client(settings: &AdviceSettings) -> Result<GeminiClient, AdviceError> {
    let mut config = GeminiConfig::from_env(&settings.api_key_env)?;
    config.base_url.clone_from(&settings.base_url);
    config.model.clone_from(&settings.model);
    config.timeout = settings.timeout();
    GeminiClient::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wagebook_advice::SERVICE_DOWN_MESSAGE;
    use wagebook_core::{Currency, SalaryInputs};

    #[test]
    fn missing_key_still_yields_fallback() {
        let settings = AdviceSettings {
            api_key_env: "WAGEBOOK_UNSET_KEY_FOR_TESTS".to_string(),
            ..AdviceSettings::default()
        };
        let advisor = Advisor::from_settings(&settings).unwrap();
        let request = AdviceRequest::from_inputs(SalaryInputs::new(183.0, 8.0), Currency::Twd);
        let outcome = advisor.ask(&request).unwrap();
        assert_eq!(outcome.text(), SERVICE_DOWN_MESSAGE);
        assert!(!advisor.is_busy());
    }
}
