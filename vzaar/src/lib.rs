#![doc = include_str!("../README.md")]

pub use vzaar_core::*;

pub use vzaar_client::*;

/// OAuth 1.0a signing types, for callers that sign requests themselves.
pub mod oauth {
    pub use vzaar_oauth::*;
}

#[cfg(feature = "default-context")]
use vzaar_file_read_tokio::TokioFileRead;
#[cfg(feature = "default-context")]
use vzaar_http_send_reqwest::ReqwestHttpSend;

/// Create a context wired with the default capabilities:
/// tokio file reading and a reqwest transport.
#[cfg(feature = "default-context")]
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
}

/// Create a ready-to-use client for the given token/secret pair.
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> vzaar::Result<()> {
/// let client = vzaar::default_client("mytoken", "mysecret");
/// let login = client.who_am_i().await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client(token: impl Into<String>, secret: impl Into<String>) -> Client {
    Client::new(
        default_context(),
        Config::new().with_token(token).with_secret(secret),
    )
}
