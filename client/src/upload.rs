//! Direct-to-storage upload plumbing.
//!
//! The storage POST is authorized by the policy fields issued with the
//! upload signature, not by OAuth; the body is a hand-assembled
//! `multipart/form-data` form with the file content as the final part, which
//! is what the storage service requires.

use bytes::Bytes;
use rand::Rng;
use serde::Deserialize;

use vzaar_core::{Error, Result};

use crate::models::UploadSignature;

/// Random boundary, long enough that colliding with file content is not a
/// practical concern.
pub(crate) fn generate_boundary() -> String {
    let mut buf = [0u8; 16];
    rand::thread_rng().fill(&mut buf[..]);
    hex::encode(buf)
}

/// Assemble the storage form.
///
/// Policy fields first, in the order the upload signature enumerates them,
/// `success_action_status=201` so the service answers with an XML body, and
/// the file part last.
pub(crate) fn multipart_body(
    signature: &UploadSignature,
    file_name: &str,
    data: &[u8],
    boundary: &str,
) -> Bytes {
    let fields = [
        ("AWSAccessKeyId", signature.access_key_id.as_str()),
        ("Signature", signature.signature.as_str()),
        ("acl", signature.acl.as_str()),
        ("bucket", signature.bucket.as_str()),
        ("policy", signature.policy.as_str()),
        ("success_action_status", "201"),
        ("key", signature.key.as_str()),
    ];

    let mut body = Vec::with_capacity(data.len() + 1024);
    for (name, value) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Bytes::from(body)
}

#[derive(Deserialize)]
struct PostResponse {
    #[serde(default, rename = "Key")]
    key: Option<String>,
}

/// Pull the video GUID out of the storage response.
///
/// The stored key is shaped `<prefix>/<guid>/<filename>`; the GUID is the
/// second-to-last path segment.
pub(crate) fn extract_upload_guid(xml: &str) -> Result<String> {
    let response: PostResponse = quick_xml::de::from_str(xml).map_err(|e| {
        Error::upload_response_invalid("storage response is not valid XML").with_source(e)
    })?;

    let key = response
        .key
        .ok_or_else(|| Error::upload_response_invalid("storage response missing Key"))?;

    let segments: Vec<&str> = key.split('/').collect();
    if segments.len() < 2 {
        return Err(Error::upload_response_invalid(format!(
            "unexpected key shape: {key}"
        )));
    }

    Ok(segments[segments.len() - 2].to_string())
}
