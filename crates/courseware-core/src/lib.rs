//! # Courseware Core
//!
//! Core types shared by every Courseware crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use courseware_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("courses not found"));
//! ```

pub mod errors;

pub use errors::{AppError, ErrorResponse};
