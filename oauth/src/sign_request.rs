use std::fmt::Write;

use http::header::AUTHORIZATION;
use http::HeaderValue;
use log::debug;
use rand::Rng;

use vzaar_core::percent::percent_encode;
use vzaar_core::time::now;
use vzaar_core::{Error, Result};

use crate::constants::*;
use crate::{Credential, SignatureMethod};

/// Signs outbound requests with OAuth 1.0a.
///
/// The signer is stateless across calls: nonce and timestamp are generated
/// per request, so concurrent signing against the same credential is safe.
#[derive(Debug, Default)]
pub struct RequestSigner {
    method: SignatureMethod,

    nonce: Option<String>,
    timestamp: Option<i64>,
}

impl RequestSigner {
    /// Create a signer for the given signature method.
    pub fn new(method: SignatureMethod) -> Self {
        Self {
            method,
            nonce: None,
            timestamp: None,
        }
    }

    /// Pin the nonce.
    ///
    /// # Note
    ///
    /// We should always generate a fresh nonce per request.
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Pin the timestamp.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sign the request, inserting the `Authorization` header.
    ///
    /// Returns the [`SignedRequest`] so callers can inspect the base string
    /// when the server disputes a signature.
    pub fn sign(
        &self,
        parts: &mut http::request::Parts,
        credential: Option<&Credential>,
    ) -> Result<SignedRequest> {
        self.sign_with_params(parts, credential, &[])
    }

    /// Sign the request, folding extra parameters into the signature.
    ///
    /// `body_params` is for requests whose body is form-encoded: those pairs
    /// participate in the base string even though they never appear in the
    /// URL or the header.
    pub fn sign_with_params(
        &self,
        parts: &mut http::request::Parts,
        credential: Option<&Credential>,
        body_params: &[(String, String)],
    ) -> Result<SignedRequest> {
        let cred = credential
            .ok_or_else(|| Error::credential_invalid("missing credential, refusing to sign"))?;

        let method = parts.method.as_str().to_uppercase();
        let url = normalize_url(&parts.uri)?;

        let nonce = self.nonce.clone().unwrap_or_else(generate_nonce);
        let timestamp = self.timestamp.unwrap_or_else(|| now().timestamp());

        // Protocol parameters, in the order they are emitted in the header.
        let mut oauth_params = vec![
            (OAUTH_CONSUMER_KEY.to_string(), cred.consumer.key.clone()),
        ];
        if let Some(token) = &cred.token {
            oauth_params.push((OAUTH_TOKEN.to_string(), token.key.clone()));
        }
        oauth_params.push((
            OAUTH_SIGNATURE_METHOD.to_string(),
            self.method.name().to_string(),
        ));
        oauth_params.push((OAUTH_TIMESTAMP.to_string(), timestamp.to_string()));
        oauth_params.push((OAUTH_NONCE.to_string(), nonce));
        oauth_params.push((OAUTH_VERSION.to_string(), OAUTH_VERSION_1_0.to_string()));

        // The base string covers the URL query, any form-encoded body pairs,
        // and every oauth_* parameter except the signature itself.
        let mut signature_params: Vec<(String, String)> = parts
            .uri
            .query()
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        signature_params.extend_from_slice(body_params);
        signature_params.extend(oauth_params.iter().cloned());

        let base_string = base_string(&method, &url, &signature_params);
        debug!("calculated base string: {base_string}");

        let signature = self
            .method
            .sign(&base_string, &cred.consumer, cred.token.as_ref());
        oauth_params.push((OAUTH_SIGNATURE.to_string(), signature));

        let signed = SignedRequest {
            method,
            url,
            params: oauth_params,
            base_string,
        };

        let mut value: HeaderValue = signed.authorization_header().parse()?;
        value.set_sensitive(true);
        parts.headers.insert(AUTHORIZATION, value);

        Ok(signed)
    }
}

/// One signed outbound call, kept around for diagnostics.
///
/// Created per call and discarded once the header is emitted; nothing is
/// shared across requests.
#[derive(Debug)]
pub struct SignedRequest {
    /// Uppercased HTTP method.
    pub method: String,
    /// Normalized URL the signature covers.
    pub url: String,
    /// Protocol parameters in emission order, `oauth_signature` last.
    pub params: Vec<(String, String)>,
    /// The exact string that was signed.
    pub base_string: String,
}

impl SignedRequest {
    /// Render the `Authorization` header value.
    ///
    /// `OAuth key="enc(value)", ...` with parameters in [`Self::params`]
    /// order.
    pub fn authorization_header(&self) -> String {
        let mut header = String::with_capacity(256);
        header.push_str("OAuth ");

        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                header.push_str(", ");
            }
            // Infallible: writing to a String.
            write!(header, "{}=\"{}\"", key, percent_encode(value)).expect("write to string");
        }

        header
    }

    /// The computed `oauth_signature` value.
    pub fn signature(&self) -> &str {
        self.params
            .last()
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }
}

/// Normalize the URL for signing.
///
/// Scheme and host lowercased, default ports stripped, query and fragment
/// dropped (the query participates as parameters instead).
fn normalize_url(uri: &http::Uri) -> Result<String> {
    let scheme = uri.scheme_str().unwrap_or("http").to_ascii_lowercase();
    let authority = uri
        .authority()
        .ok_or_else(|| Error::request_invalid("request without authority is invalid for signing"))?;

    let host = authority.host().to_ascii_lowercase();
    let path = match uri.path() {
        "" => "/",
        path => path,
    };
    let default_port = match scheme.as_str() {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    };

    match authority.port_u16() {
        Some(port) if Some(port) != default_port => {
            Ok(format!("{scheme}://{host}:{port}{path}"))
        }
        _ => Ok(format!("{scheme}://{host}{path}")),
    }
}

/// Build the signature base string.
///
/// Every key and value is percent-encoded individually, pairs are sorted by
/// encoded key with the encoded value as tie-break, joined `k=v` with `&`,
/// and the three segments are encoded once more into
/// `METHOD&url&parameters`.
fn base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort();

    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        percent_encode(method),
        percent_encode(url),
        percent_encode(&joined)
    )
}

fn generate_nonce() -> String {
    let mut buf = [0u8; 16];
    rand::thread_rng().fill(&mut buf[..]);
    hex::encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Consumer, Token};
    use pretty_assertions::assert_eq;
    use vzaar_core::ErrorKind;

    fn test_credential() -> Credential {
        Credential::new(Consumer::new("ck", "cs"), Some(Token::new("tk", "ts")))
    }

    fn parts_for(method: http::Method, uri: &str) -> http::request::Parts {
        let mut req = http::Request::new(());
        *req.method_mut() = method;
        *req.uri_mut() = uri.parse().expect("uri must be valid");
        req.into_parts().0
    }

    #[test]
    fn test_sign_get_request() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let signer = RequestSigner::new(SignatureMethod::HmacSha1)
            .with_nonce("abc")
            .with_timestamp(1_700_000_000);

        let mut parts = parts_for(
            http::Method::GET,
            "https://api.example.com/videos.json?count=20",
        );
        let signed = signer.sign(&mut parts, Some(&test_credential()))?;

        assert_eq!(
            signed.base_string,
            "GET&https%3A%2F%2Fapi.example.com%2Fvideos.json&count%3D20%26oauth_consumer_key%3Dck%26oauth_nonce%3Dabc%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26oauth_token%3Dtk%26oauth_version%3D1.0"
        );
        assert_eq!(signed.signature(), "4La4sknJDeCLSDIZbT8VIrKkzLc=");
        assert_eq!(
            parts
                .headers
                .get(AUTHORIZATION)
                .expect("header must be set")
                .to_str()
                .unwrap(),
            "OAuth oauth_consumer_key=\"ck\", oauth_token=\"tk\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1700000000\", \
             oauth_nonce=\"abc\", oauth_version=\"1.0\", \
             oauth_signature=\"4La4sknJDeCLSDIZbT8VIrKkzLc%3D\""
        );

        Ok(())
    }

    #[test]
    fn test_sign_is_deterministic() -> Result<()> {
        let signer = RequestSigner::new(SignatureMethod::HmacSha1)
            .with_nonce("abc")
            .with_timestamp(1_700_000_000);
        let cred = test_credential();

        let mut first = parts_for(http::Method::GET, "https://api.example.com/a?x=1&y=2");
        let mut second = parts_for(http::Method::GET, "https://api.example.com/a?x=1&y=2");

        assert_eq!(
            signer.sign(&mut first, Some(&cred))?.signature(),
            signer.sign(&mut second, Some(&cred))?.signature(),
        );

        Ok(())
    }

    #[test]
    fn test_base_string_stable_under_param_permutation() {
        let forward = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "0".to_string()),
        ];
        let mut shuffled = forward.clone();
        shuffled.reverse();

        assert_eq!(
            base_string("GET", "https://example.com/", &forward),
            base_string("GET", "https://example.com/", &shuffled),
        );
        // Duplicate keys tie-break on the encoded value.
        assert!(
            base_string("GET", "https://example.com/", &forward)
                .contains("a%3D0%26a%3D1%26b%3D2")
        );
    }

    #[test]
    fn test_sign_with_anonymous_consumer() -> Result<()> {
        // vzaar signs with an empty consumer pair; only the token matters.
        let cred = Credential::new(Consumer::new("", ""), Some(Token::new("someuser", "apikey123")));
        let signer = RequestSigner::new(SignatureMethod::HmacSha1)
            .with_nonce("fixednonce")
            .with_timestamp(1_400_000_000);

        let mut parts = parts_for(
            http::Method::GET,
            "https://vzaar.com/api/videos/signature?flash_request=true",
        );
        let signed = signer.sign(&mut parts, Some(&cred))?;

        assert_eq!(signed.signature(), "fKxcLsBB8aRwpMBIkTyFAKY5uj4=");

        Ok(())
    }

    #[test]
    fn test_sign_with_body_params() -> Result<()> {
        let signer = RequestSigner::new(SignatureMethod::HmacSha1)
            .with_nonce("abc")
            .with_timestamp(1_700_000_000);
        let cred = test_credential();

        let mut plain = parts_for(http::Method::POST, "https://api.example.com/videos");
        let bare = signer.sign(&mut plain, Some(&cred))?;

        let mut with_body = parts_for(http::Method::POST, "https://api.example.com/videos");
        let folded = signer.sign_with_params(
            &mut with_body,
            Some(&cred),
            &[("status".to_string(), "ready".to_string())],
        )?;

        assert!(folded.base_string.contains("status%3Dready"));
        assert_ne!(bare.signature(), folded.signature());

        Ok(())
    }

    #[test]
    fn test_missing_credential_refused() {
        let signer = RequestSigner::default();
        let mut parts = parts_for(http::Method::GET, "https://api.example.com/");

        let err = signer.sign(&mut parts, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(parts.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_normalize_url() -> Result<()> {
        let cases = [
            ("https://Example.COM/Path", "https://example.com/Path"),
            ("https://example.com:443/a", "https://example.com/a"),
            ("http://example.com:80/a", "http://example.com/a"),
            ("http://example.com:8080/a", "http://example.com:8080/a"),
            ("https://example.com/a?x=1#frag", "https://example.com/a"),
            ("https://example.com", "https://example.com/"),
        ];

        for (input, expected) in cases {
            let uri: http::Uri = input.parse().expect("uri must be valid");
            assert_eq!(normalize_url(&uri)?, expected, "failed on {input}");
        }

        Ok(())
    }

    #[test]
    fn test_generated_nonces_are_unique() {
        let a = generate_nonce();
        let b = generate_nonce();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
