//! Client for the vzaar video hosting API.
//!
//! One method per remote capability: account/user/video metadata lookups,
//! video edit/delete/process, and the two-phase upload (fetch a signed S3
//! policy from the API, then POST the file straight to the bucket). Signed
//! calls go through [`vzaar_oauth`]'s HMAC-SHA1 signer; transport and file
//! access are capabilities supplied via [`vzaar_core::Context`].
//!
//! ## Example
//!
//! ```no_run
//! use vzaar_client::{Client, Config};
//! use vzaar_core::Context;
//!
//! # async fn example(ctx: Context) -> vzaar_core::Result<()> {
//! let client = Client::new(
//!     ctx,
//!     Config::new().with_token("mytoken").with_secret("mysecret"),
//! );
//!
//! let login = client.who_am_i().await?;
//! println!("authenticated as {login}");
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::Config;

mod client;
pub use client::{Client, SortOrder, VideoEdit, VideoListOptions, VideoProcess, VideoSearch};

mod models;
pub use models::{
    Account, AccountPrice, Profile, UploadSignature, User, Video, VideoDetails, VideoStatus,
};

mod body;
mod upload;
