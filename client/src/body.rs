//! XML request bodies.
//!
//! The API tunnels PUT/DELETE semantics through a `<_method>` marker carried
//! in the body. Bodies are built from typed structs and serialized with
//! quick-xml so titles and descriptions containing `&`, `<` or `>` come out
//! escaped instead of corrupting the envelope.

use serde::Serialize;

use vzaar_core::{Error, Result};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
#[serde(rename = "vzaar-api")]
struct DeleteEnvelope {
    #[serde(rename = "_method")]
    method: &'static str,
}

#[derive(Serialize)]
#[serde(rename = "vzaar-api")]
struct EditEnvelope<'a> {
    #[serde(rename = "_method")]
    method: &'static str,
    video: EditVideo<'a>,
}

#[derive(Serialize)]
struct EditVideo<'a> {
    title: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "is_false")]
    private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    seo_url: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename = "vzaar-api")]
struct ProcessEnvelope<'a> {
    video: ProcessVideo<'a>,
}

#[derive(Serialize)]
struct ProcessVideo<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    replace_id: Option<&'a str>,
    guid: &'a str,
    title: &'a str,
    description: &'a str,
    labels: &'a str,
    profile: u8,
    #[serde(skip_serializing_if = "is_false")]
    transcoding: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn to_xml<T: Serialize>(value: &T) -> Result<String> {
    let body = quick_xml::se::to_string(value)
        .map_err(|e| Error::request_invalid("failed to serialize request body").with_source(e))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}

/// `<_method>delete</_method>` override envelope.
pub(crate) fn delete_body() -> Result<String> {
    to_xml(&DeleteEnvelope { method: "delete" })
}

/// `<_method>put</_method>` envelope carrying the edited metadata.
///
/// `private` and `seo_url` are omitted entirely when unset.
pub(crate) fn edit_body(
    title: &str,
    description: &str,
    private: bool,
    seo_url: Option<&str>,
) -> Result<String> {
    to_xml(&EditEnvelope {
        method: "put",
        video: EditVideo {
            title,
            description,
            private,
            seo_url,
        },
    })
}

/// Processing request for a previously uploaded file.
///
/// `replace_id` is present only when replacing an existing video, and
/// `transcoding` only when forcing a re-encode.
pub(crate) fn process_body(
    guid: &str,
    title: &str,
    description: &str,
    labels: &str,
    profile: u8,
    transcoding: bool,
    replace_id: Option<&str>,
) -> Result<String> {
    to_xml(&ProcessEnvelope {
        video: ProcessVideo {
            replace_id,
            guid,
            title,
            description,
            labels,
            profile,
            transcoding,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delete_body() -> Result<()> {
        assert_eq!(
            delete_body()?,
            r#"<?xml version="1.0" encoding="UTF-8"?><vzaar-api><_method>delete</_method></vzaar-api>"#
        );
        Ok(())
    }

    #[test]
    fn test_edit_body_minimal() -> Result<()> {
        assert_eq!(
            edit_body("intro", "first upload", false, None)?,
            r#"<?xml version="1.0" encoding="UTF-8"?><vzaar-api><_method>put</_method><video><title>intro</title><description>first upload</description></video></vzaar-api>"#
        );
        Ok(())
    }

    #[test]
    fn test_edit_body_full() -> Result<()> {
        assert_eq!(
            edit_body("intro", "first upload", true, Some("my-intro"))?,
            r#"<?xml version="1.0" encoding="UTF-8"?><vzaar-api><_method>put</_method><video><title>intro</title><description>first upload</description><private>true</private><seo_url>my-intro</seo_url></video></vzaar-api>"#
        );
        Ok(())
    }

    #[test]
    fn test_edit_body_escapes_markup() -> Result<()> {
        let body = edit_body("cats & dogs", "a <b> c", false, None)?;
        assert!(body.contains("<title>cats &amp; dogs</title>"));
        assert!(body.contains("<description>a &lt;b&gt; c</description>"));
        Ok(())
    }

    #[test]
    fn test_process_body_omits_unset_fields() -> Result<()> {
        let body = process_body("GUID1", "intro", "first upload", "tag1,tag2", 2, false, None)?;
        assert_eq!(
            body,
            r#"<?xml version="1.0" encoding="UTF-8"?><vzaar-api><video><guid>GUID1</guid><title>intro</title><description>first upload</description><labels>tag1,tag2</labels><profile>2</profile></video></vzaar-api>"#
        );
        Ok(())
    }

    #[test]
    fn test_process_body_with_replace_and_transcoding() -> Result<()> {
        let body = process_body("GUID1", "intro", "d", "news", 5, true, Some("7890"))?;
        assert_eq!(
            body,
            r#"<?xml version="1.0" encoding="UTF-8"?><vzaar-api><video><replace_id>7890</replace_id><guid>GUID1</guid><title>intro</title><description>d</description><labels>news</labels><profile>5</profile><transcoding>true</transcoding></video></vzaar-api>"#
        );
        Ok(())
    }
}
