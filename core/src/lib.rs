//! Core components for signing AWS API requests.
//!
//! This crate provides the foundational types shared by the awsign service
//! crates: the request view that signers read, the error type, and small
//! utilities for hashing, time formatting, redaction and environment access.
//!
//! ## Overview
//!
//! - [`SigningRequest`]: an immutable snapshot of the parts of an HTTP request
//!   that take part in signing (method, host, path, query and headers).
//! - [`Error`] and [`ErrorKind`]: the error taxonomy used by every crate.
//! - [`Env`]: an abstraction over environment variables so configuration can be
//!   loaded from the process or from a fixed map in tests.
//!
//! ## Example
//!
//! ```
//! use awsign_core::SigningRequest;
//! use http::Method;
//!
//! let req = SigningRequest::new(Method::GET, "iam.amazonaws.com", "/")
//!     .with_query("Action", "ListUsers")
//!     .with_query("Version", "2010-05-08");
//!
//! assert_eq!(req.host, "iam.amazonaws.com");
//! assert_eq!(req.query.len(), 2);
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod request;
pub use request::SigningRequest;
