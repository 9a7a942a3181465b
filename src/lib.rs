//! taskday - a small personal task tracker served over HTTP
//!
//! Tasks live in per-visitor, in-memory sessions. The library exposes the
//! task store and view selection ([`model`]), the session registry
//! ([`session`]), HTML rendering ([`render`]) and the axum server ([`api`]).

pub mod api;
pub mod cli;
pub mod error;
pub mod model;
pub mod render;
pub mod session;
pub mod storage;

pub use error::{Result, TaskdayError};
