//! Analysis pipeline: configuration, validation, orchestration and results.

pub mod artifacts;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod service;
pub mod spec;
pub mod validation;
