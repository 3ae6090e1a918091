//! # wagebook-advice
//!
//! One-shot AI commentary on a quick salary calculation.
//!
//! - [`AdviceRequest`] and [`render_prompt`]: what is asked
//! - [`AdviceService`]: the external text-generation collaborator
//! - [`GeminiClient`]: the default HTTP implementation
//! - [`AdviceDesk`]: single-flight guard that always ends in advice text or a
//!   fixed fallback message

pub mod desk;
pub mod gemini;
pub mod prompt;
pub mod service;

pub use desk::{AdviceDesk, AdviceOutcome, Pending, EMPTY_RESPONSE_MESSAGE, SERVICE_DOWN_MESSAGE};
pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::{render_prompt, AdviceRequest};
pub use service::{AdviceError, AdviceService};
