//! HTTP client for the operator search backend.
//!
//! This crate provides one thing: an HTTP client bound to the backend's base
//! address, so callers issue requests with relative paths and never repeat
//! the server location.
//!
//! # Usage
//!
//! ```no_run
//! use backend_client::ApiClient;
//!
//! # async fn run() -> Result<(), backend_client::ApiError> {
//! // Create a client from environment variables
//! let api = ApiClient::from_env();
//!
//! // Relative paths are resolved against the base address
//! let response = api.get("/search")?.query(&[("query", "unimed")]).send().await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! - `API_BASE_URL`: backend base address (default `http://127.0.0.1:5000`)
//!
//! # Architecture
//!
//! - [`ClientConfig`] holds the base address
//! - [`ApiClient`] resolves paths against it and hands out `reqwest` builders
//! - [`shared`] returns a process-wide instance for code that cannot take one by injection
//! - [`OperatorSearch`] is the typed `/search` call, implemented by [`ApiClient`]

pub mod client;
pub mod config;
pub mod error;
pub mod search;

pub use client::{join_url, shared, ApiClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL, ENV_API_BASE_URL};
pub use error::{ApiError, Result};
pub use search::{Operator, OperatorSearch, SearchResponse, SEARCH_PATH};
