//! Meeting minutes generation
//!
//! Turns a meeting transcript into structured minutes through a
//! generative-text model:
//!
//! 1. [`render_prompt`] embeds meeting metadata, agenda and transcript
//! 2. a [`GenerativeModel`] completes the prompt
//! 3. [`validate_response`] accepts only the exact
//!    `{executiveSummary, structuredMinutes, actionPlan}` shape
//!
//! # Example
//!
//! ```rust
//! use govdash_minutes::validate_response;
//!
//! let doc = validate_response(
//!     "```json\n{\"executiveSummary\":\"ok\",\"structuredMinutes\":\"...\",\"actionPlan\":[]}\n```",
//! ).unwrap();
//! assert_eq!(doc.executive_summary, "ok");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod request;
pub mod validate;

pub use error::{MinutesError, MinutesResult};
pub use generator::MinuteGenerator;
pub use model::{GeminiConfig, GeminiModel, GenerativeModel, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use prompt::render_prompt;
pub use request::{AgendaItem, MeetingInfo, MinutesRequest};
pub use validate::{strip_code_fence, validate_response, ActionItem, MinutesDocument};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
