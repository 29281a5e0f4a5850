// Protocol parameter names, emitted in this order in the Authorization
// header.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_VERSION: &str = "oauth_version";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";

pub const OAUTH_VERSION_1_0: &str = "1.0";
