//! ClaudeAPI client - organizations lookup and streamed chat replies.
//!
//! The interesting part is [`sse`]: an incremental decoder that turns the
//! chat endpoint's byte chunks into JSON events, no matter where the chunk
//! boundaries fall. [`client::ApiClient`] drives it and keeps the
//! loading/error [`state`] of each call.
//!
//! ```ignore
//! use claudeapi::client::ApiClient;
//! use claudeapi::config::ClientConfig;
//! use futures_util::StreamExt;
//!
//! let client = ApiClient::new(ClientConfig::from_env()?)?;
//! let org = &client.get_organizations().await?[0];
//! let mut events = client.stream_chat(&org.id, "Hello").await?;
//! while let Some(event) = events.next().await {
//!     println!("{}", event?);
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sse;
pub mod state;
pub mod traits;
