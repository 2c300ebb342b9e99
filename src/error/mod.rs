//! Error handling for the ClaudeAPI client.
//!
//! - [`ApiError`] ends a call. Its message is mirrored into
//!   [`CallState::error`](crate::state::CallState) before it reaches the caller.
//! - [`ParseError`] is a single bad `data:` line. It is reported to a
//!   diagnostic sink and the stream keeps going.
//! - [`ErrorCategory`] is a coarse classification used for logging and hints.
//!
//! | Failure | Variant | Aborts call |
//! |---------|---------|-------------|
//! | non-2xx status | `ApiError::HttpStatus` | yes |
//! | connection / body read failure | `ApiError::Transport` | yes |
//! | idle deadline elapsed | `ApiError::Timeout` | yes |
//! | bad `data:` payload | `ParseError` | no |

mod api;
mod category;
mod parse;

pub use api::{ApiError, ApiResult};
pub use category::ErrorCategory;
pub use parse::ParseError;
