//! Typed views of the API's JSON and XML payloads.
//!
//! The deserialization here is deliberately lenient: the service has grown
//! fields over the years and omits others depending on account type, so
//! everything optional defaults instead of failing the whole response.

use serde::Deserialize;
use std::fmt;

use vzaar_core::{Error, Result};

/// Processing state the service reports for a video.
///
/// Purely descriptive: the client never interprets transitions, it just
/// surfaces what the server said.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoStatus {
    /// Processing not complete.
    Processing = 1,
    /// Available (processing complete, video ready).
    Available = 2,
    /// Expired.
    Expired = 3,
    /// On hold, waiting for encoding to be available.
    OnHold = 4,
    /// Encoding failed.
    Failed = 5,
    /// Encoding unavailable.
    EncodingUnavailable = 6,
    /// Not available.
    NotAvailable = 7,
    /// Replaced by another upload.
    Replaced = 8,
    /// Deleted.
    Deleted = 9,
}

impl VideoStatus {
    /// Map the service's numeric status code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(VideoStatus::Processing),
            2 => Some(VideoStatus::Available),
            3 => Some(VideoStatus::Expired),
            4 => Some(VideoStatus::OnHold),
            5 => Some(VideoStatus::Failed),
            6 => Some(VideoStatus::EncodingUnavailable),
            7 => Some(VideoStatus::NotAvailable),
            8 => Some(VideoStatus::Replaced),
            9 => Some(VideoStatus::Deleted),
            _ => None,
        }
    }

    /// The numeric code the service uses on the wire.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Human readable description, as the service documents it.
    pub fn description(&self) -> &'static str {
        match self {
            VideoStatus::Processing => "Processing not complete",
            VideoStatus::Available => "Available (processing complete, video ready)",
            VideoStatus::Expired => "Expired",
            VideoStatus::OnHold => "On Hold (waiting for encoding to be available)",
            VideoStatus::Failed => "Encoding Failed",
            VideoStatus::EncodingUnavailable => "Encoding Unavailable",
            VideoStatus::NotAvailable => "n/a",
            VideoStatus::Replaced => "Replaced",
            VideoStatus::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Encoding size profile used when processing an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// 320px frame.
    Small = 1,
    /// 640px frame, the service default.
    #[default]
    Medium = 2,
    /// 768px frame.
    Large = 3,
    /// 1280px frame.
    HighDefinition = 4,
    /// Keep the source dimensions.
    Original = 5,
}

impl Profile {
    /// The numeric code the service uses on the wire.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Account type details returned by `api/accounts/{id}.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    /// Payload version marker.
    #[serde(default)]
    pub version: Option<String>,
    /// Numeric account type id.
    #[serde(default)]
    pub account_id: Option<u64>,
    /// Account type name.
    #[serde(default)]
    pub title: Option<String>,
    /// Monthly price.
    #[serde(default)]
    pub monthly: Option<AccountPrice>,
    /// Bandwidth allowance in bytes.
    #[serde(default)]
    pub bandwidth: Option<u64>,
    /// Upload ceiling in bytes.
    #[serde(default)]
    pub max_file_size: Option<u64>,
}

/// Price element nested in [`Account`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPrice {
    /// Currency symbol.
    #[serde(default)]
    pub currency: Option<String>,
    /// Price in that currency.
    #[serde(default)]
    pub price: Option<f64>,
}

/// Public user details returned by `api/{user}.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    /// Payload version marker.
    #[serde(default)]
    pub version: Option<String>,
    /// Numeric user id.
    #[serde(default)]
    pub author_id: Option<u64>,
    /// Username.
    #[serde(default)]
    pub author_name: Option<String>,
    /// Profile URL.
    #[serde(default)]
    pub author_url: Option<String>,
    /// Account type id.
    #[serde(default)]
    pub author_account: Option<u64>,
    /// Registration timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Number of active videos.
    #[serde(default)]
    pub video_count: Option<u64>,
    /// Total plays across the user's videos.
    #[serde(default)]
    pub play_count: Option<u64>,
}

/// One entry of a `videos.json` listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    /// Video id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Upload timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Public page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Play count.
    #[serde(default)]
    pub play_count: Option<u64>,
    /// Duration, `mm:ss`.
    #[serde(default)]
    pub duration: Option<String>,
    /// Owning username.
    #[serde(default)]
    pub user: Option<String>,
    /// Numeric processing state, see [`VideoStatus`].
    #[serde(default)]
    pub status_id: Option<u8>,
}

impl Video {
    /// Decode [`Self::status_id`].
    pub fn status(&self) -> Option<VideoStatus> {
        self.status_id.and_then(VideoStatus::from_code)
    }
}

/// Full video metadata returned by `api/videos/{id}.json`, oEmbed shaped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoDetails {
    /// oEmbed resource type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Payload version marker.
    #[serde(default)]
    pub version: Option<String>,
    /// Player width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Player height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Ready-to-embed player markup.
    #[serde(default)]
    pub html: Option<String>,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Owning username.
    #[serde(default)]
    pub author_name: Option<String>,
    /// Owner profile URL.
    #[serde(default)]
    pub author_url: Option<String>,
    /// Owner account type id.
    #[serde(default)]
    pub author_account: Option<u64>,
    /// Numeric processing state, see [`VideoStatus`].
    #[serde(default)]
    pub video_status_id: Option<u8>,
    /// Play count.
    #[serde(default)]
    pub play_count: Option<u64>,
    /// Stored size in bytes.
    #[serde(default)]
    pub total_size: Option<u64>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Full-size framegrab URL.
    #[serde(default)]
    pub framegrab_url: Option<String>,
    /// Framegrab width in pixels.
    #[serde(default)]
    pub framegrab_width: Option<u32>,
    /// Framegrab height in pixels.
    #[serde(default)]
    pub framegrab_height: Option<u32>,
}

impl VideoDetails {
    /// Decode [`Self::video_status_id`].
    pub fn status(&self) -> Option<VideoStatus> {
        self.video_status_id.and_then(VideoStatus::from_code)
    }
}

/// Server-issued upload policy.
///
/// Fetched immediately before an upload, used for exactly one storage POST,
/// then discarded. Authorization for the storage call is carried entirely by
/// these fields; the POST itself is not OAuth-signed.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSignature {
    /// Upload GUID the service pre-assigned, when present.
    #[serde(default)]
    pub guid: Option<String>,
    /// Storage key template, `${filename}` placeholder included.
    pub key: String,
    /// Access control value for the stored object.
    pub acl: String,
    /// Target bucket name.
    pub bucket: String,
    /// Base64 policy document the storage service validates.
    pub policy: String,
    /// IAM access key id that issued the policy.
    #[serde(rename = "accesskeyid")]
    pub access_key_id: String,
    /// Storage signature over the policy.
    pub signature: String,
    /// Whether the bucket endpoint is https.
    #[serde(default)]
    pub https: Option<String>,
    /// Policy expiry timestamp.
    #[serde(default, rename = "expirationdate")]
    pub expiration_date: Option<String>,
}

impl UploadSignature {
    /// Parse the `<vzaar-api>` signature payload.
    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml)
            .map_err(|e| Error::parse_invalid("upload signature response is not valid").with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_status_codes_round_trip() {
        for code in 1..=9 {
            let status = VideoStatus::from_code(code).expect("code must map");
            assert_eq!(status.code(), code);
        }
        assert!(VideoStatus::from_code(0).is_none());
        assert!(VideoStatus::from_code(10).is_none());
    }

    #[test]
    fn test_video_status_descriptions() {
        assert_eq!(
            VideoStatus::Available.to_string(),
            "Available (processing complete, video ready)"
        );
        assert_eq!(VideoStatus::NotAvailable.description(), "n/a");
    }

    #[test]
    fn test_profile_codes() {
        assert_eq!(Profile::default(), Profile::Medium);
        assert_eq!(Profile::Small.code(), 1);
        assert_eq!(Profile::Original.code(), 5);
    }

    #[test]
    fn test_video_list_entry_decodes() {
        let raw = r#"{
            "id": 7890,
            "title": "intro",
            "description": "first upload",
            "url": "https://vzaar.com/videos/7890",
            "play_count": 3,
            "status_id": 2,
            "unknown_future_field": true
        }"#;

        let video: Video = serde_json::from_str(raw).expect("must decode");
        assert_eq!(video.id, Some(7890));
        assert_eq!(video.status(), Some(VideoStatus::Available));
        assert_eq!(video.duration, None);
    }

    #[test]
    fn test_upload_signature_from_xml() {
        let raw = r#"<?xml version="1.0" encoding="UTF-8"?>
<vzaar-api>
  <guid>fde1c9f64a68492c94c2a140f2ad52c5</guid>
  <key>vzaar/fde/1c9/source/${filename}</key>
  <https>false</https>
  <acl>private</acl>
  <bucket>vzaar-upload</bucket>
  <policy>eyJleHBpcmF0aW9uIjog</policy>
  <expirationdate>2026-08-08T12:00:00Z</expirationdate>
  <accesskeyid>AKIAEXAMPLE</accesskeyid>
  <signature>ldZnX0V2UzI=</signature>
</vzaar-api>"#;

        let signature = UploadSignature::from_xml(raw).expect("must parse");
        assert_eq!(signature.bucket, "vzaar-upload");
        assert_eq!(signature.acl, "private");
        assert_eq!(signature.access_key_id, "AKIAEXAMPLE");
        assert_eq!(signature.key, "vzaar/fde/1c9/source/${filename}");
        assert_eq!(signature.guid.as_deref(), Some("fde1c9f64a68492c94c2a140f2ad52c5"));
    }

    #[test]
    fn test_upload_signature_rejects_incomplete_payload() {
        let err = UploadSignature::from_xml("<vzaar-api><bucket>b</bucket></vzaar-api>")
            .expect_err("must fail");
        assert_eq!(err.kind(), vzaar_core::ErrorKind::ParseInvalid);
    }
}
