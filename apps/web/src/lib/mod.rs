//! Shared front-end utilities for configuration, session fetching and errors.
//!
//! The session endpoint is the only network dependency. Everything it returns
//! is public user metadata; credentials stay in `HttpOnly` cookies.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub(crate) mod config;
pub(crate) mod errors;

pub(crate) const GIT_COMMIT_HASH: &str = env!("NAVGATE_WEB_GIT_SHA");

#[cfg(target_arch = "wasm32")]
pub(crate) use api::get_optional_json_with_credentials;
pub(crate) use errors::AppError;
