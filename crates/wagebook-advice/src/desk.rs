//! Single-flight advice requests.
//!
//! At most one request is outstanding. [`AdviceDesk::begin`] claims the busy
//! flag synchronously, so a caller can refuse a second trigger immediately
//! and then run the request on a background task. The flag is released when
//! the returned [`Pending`] is dropped, whether the request finished or not.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::prompt::{render_prompt, AdviceRequest};
use crate::service::{AdviceError, AdviceService};

/// Shown when the service answers with nothing.
pub const EMPTY_RESPONSE_MESSAGE: &str = "暫時無法取得分析建議，請稍後再試。";
/// Shown when the service could not be reached or failed.
pub const SERVICE_DOWN_MESSAGE: &str = "哎呀，AI 正在休息，請稍後再試。";

/// How a request ended. Both variants carry displayable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    Advice(String),
    Fallback(String),
}

impl AdviceOutcome {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            AdviceOutcome::Advice(text) | AdviceOutcome::Fallback(text) => text,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, AdviceOutcome::Fallback(_))
    }
}

/// A claimed request slot. Dropping it frees the slot.
#[derive(Debug)]
pub struct Pending {
    prompt: String,
    _guard: BusyGuard,
}

#[derive(Debug)]
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct AdviceDesk<A: AdviceService + ?Sized> {
    service: Arc<A>,
    busy: Arc<AtomicBool>,
    latest: Mutex<Option<AdviceOutcome>>,
}

impl<A: AdviceService + ?Sized> AdviceDesk<A> {
    pub fn new(service: Arc<A>) -> Self {
        Self {
            service,
            busy: Arc::new(AtomicBool::new(false)),
            latest: Mutex::new(None),
        }
    }

    /// Whether a request is outstanding; the trigger should be disabled while true.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The last completed outcome, if any.
    #[must_use]
    pub fn latest(&self) -> Option<AdviceOutcome> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Claim the request slot for `request`.
    ///
    /// # Errors
    ///
    /// [`AdviceError::NothingToAdvise`] when the total is not positive, and
    /// [`AdviceError::Busy`] when another request is outstanding.
    pub fn begin(&self, request: &AdviceRequest) -> Result<Pending, AdviceError> {
        if request.total <= 0 {
            return Err(AdviceError::NothingToAdvise);
        }
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AdviceError::Busy)?;
        Ok(Pending {
            prompt: render_prompt(request),
            _guard: BusyGuard(Arc::clone(&self.busy)),
        })
    }

    /// Run a claimed request to completion. Never fails: service errors and
    /// blank replies become fallback text.
    pub async fn complete(&self, pending: Pending) -> AdviceOutcome {
        let outcome = match self.service.generate(&pending.prompt).await {
            Ok(text) if !text.trim().is_empty() => AdviceOutcome::Advice(text.trim().to_string()),
            Ok(_) => {
                tracing::warn!("advice service returned an empty reply");
                AdviceOutcome::Fallback(EMPTY_RESPONSE_MESSAGE.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "advice request failed");
                AdviceOutcome::Fallback(SERVICE_DOWN_MESSAGE.to_string())
            }
        };
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome.clone());
        drop(pending);
        outcome
    }

    /// Claim the slot and run the request in one step.
    ///
    /// # Errors
    ///
    /// Same as [`AdviceDesk::begin`].
    pub async fn request(&self, request: &AdviceRequest) -> Result<AdviceOutcome, AdviceError> {
        let pending = self.begin(request)?;
        Ok(self.complete(pending).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Notify;
    use wagebook_core::{Currency, SalaryInputs};

    struct Canned(Result<&'static str, ()>);

    #[async_trait]
    impl AdviceService for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String, AdviceError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(AdviceError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            }
        }
    }

    /// Blocks until released, so a request can be held in flight.
    struct Gate(Notify);

    #[async_trait]
    impl AdviceService for Gate {
        async fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
            self.0.notified().await;
            Ok(format!("echo {}", prompt.len()))
        }
    }

    fn request(rate: f64, hours: f64) -> AdviceRequest {
        AdviceRequest::from_inputs(SalaryInputs::new(rate, hours), Currency::Twd)
    }

    #[tokio::test]
    async fn success_text_is_trimmed() {
        let desk = AdviceDesk::new(Arc::new(Canned(Ok("  存下三成收入。\n"))));
        let outcome = desk.request(&request(183.0, 8.0)).await.unwrap();
        assert_eq!(outcome, AdviceOutcome::Advice("存下三成收入。".to_string()));
        assert_eq!(desk.latest(), Some(outcome));
        assert!(!desk.is_busy());
    }

    #[tokio::test]
    async fn blank_reply_uses_try_later_message() {
        let desk = AdviceDesk::new(Arc::new(Canned(Ok("   "))));
        let outcome = desk.request(&request(183.0, 8.0)).await.unwrap();
        assert_eq!(outcome.text(), EMPTY_RESPONSE_MESSAGE);
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn failure_uses_fallback_and_allows_retry() {
        let desk = AdviceDesk::new(Arc::new(Canned(Err(()))));
        let first = desk.request(&request(183.0, 8.0)).await.unwrap();
        assert_eq!(first.text(), SERVICE_DOWN_MESSAGE);
        assert!(!desk.is_busy());
        let second = desk.request(&request(183.0, 8.0)).await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn zero_total_is_not_sent() {
        let desk = AdviceDesk::new(Arc::new(Canned(Ok("unused"))));
        let err = desk.request(&request(183.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, AdviceError::NothingToAdvise));
        assert!(desk.latest().is_none());
    }

    #[tokio::test]
    async fn second_request_is_refused_while_in_flight() {
        let gate = Arc::new(Gate(Notify::new()));
        let desk = Arc::new(AdviceDesk::new(Arc::clone(&gate)));

        let pending = desk.begin(&request(183.0, 8.0)).unwrap();
        assert!(desk.is_busy());
        assert!(matches!(
            desk.begin(&request(200.0, 1.0)),
            Err(AdviceError::Busy)
        ));

        let worker = {
            let desk = Arc::clone(&desk);
            tokio::spawn(async move { desk.complete(pending).await })
        };
        gate.0.notify_one();
        let outcome = worker.await.unwrap();
        assert!(!outcome.is_fallback());
        assert!(!desk.is_busy());
        assert!(desk.begin(&request(200.0, 1.0)).is_ok());
    }

    #[test]
    fn dropping_pending_releases_slot() {
        let desk = AdviceDesk::new(Arc::new(Canned(Ok("x"))));
        let pending = desk.begin(&request(183.0, 8.0)).unwrap();
        assert!(desk.is_busy());
        drop(pending);
        assert!(!desk.is_busy());
    }
}
