//! Core components shared by the vzaar client crates.
//!
//! This crate carries the capability context the client is built on, plus the
//! small utility modules every other crate in the workspace leans on.
//!
//! ## Overview
//!
//! - **Context**: a container holding the file-reading and HTTP-sending
//!   implementations. The client never talks to the network or the file
//!   system directly; it goes through the context, which makes every
//!   operation testable with canned transports.
//! - **Error**: the structured error type shared across the workspace.
//! - **Utilities**: RFC 3986 percent-encoding ([`percent`]), signature
//!   hashing ([`hash`]), time ([`time`]) and secret redaction ([`utils`]).
//!
//! ## Example
//!
//! ```no_run
//! use vzaar_core::Context;
//!
//! // All capabilities default to no-op implementations that error when
//! // called; configure the ones you need.
//! let ctx = Context::new();
//! // ctx.with_file_read(my_file_reader)
//! //    .with_http_send(my_http_client);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod percent;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, FileRead, HttpSend, NoopFileRead, NoopHttpSend};

mod error;
pub use error::{Error, ErrorKind, Result};
