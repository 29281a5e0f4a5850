//! OAuth 1.0a request signing for the vzaar API.
//!
//! The vzaar API authenticates calls with two-legged OAuth 1.0a: every signed
//! request carries an `Authorization: OAuth ...` header whose signature is a
//! pure function of the HTTP method, the normalized URL, the full parameter
//! set, and the consumer/token secrets. The server recomputes the signature
//! independently, so this crate has to be byte-exact: RFC 3986
//! percent-encoding, deterministic parameter ordering, and the precise
//! base-string layout of the OAuth spec.

mod credential;
pub use credential::{Consumer, Credential, Token};

mod signature;
pub use signature::SignatureMethod;

mod sign_request;
pub use sign_request::{RequestSigner, SignedRequest};

mod constants;
