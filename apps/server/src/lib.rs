//! HTTP API for client, airline and flight records
//!
//! Thin transport over [`airdesk_records`]: handlers decode requests, run
//! one service call against the shared [`state::AppState`] store and map
//! domain errors to status codes in [`api::error`].

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use error::{Error, Result};
