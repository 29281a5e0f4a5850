use bytes::Bytes;
use http::{header, Method};
use log::debug;
use serde::de::DeserializeOwned;

use vzaar_core::{Context, Error, Result};
use vzaar_oauth::{Consumer, Credential, RequestSigner, SignatureMethod, Token};

use crate::models::{Account, Profile, UploadSignature, User, Video, VideoDetails};
use crate::{body, upload, Config};

const USER_AGENT_OAUTH: &str = "Vzaar OAuth Client";
const USER_AGENT_UPLOAD: &str = "Vzaar API Client";

/// Listing order for [`Client::search_video_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Least recent first, `asc` on the wire.
    Ascending,
    /// Most recent first, `desc` on the wire. The service default.
    #[default]
    Descending,
}

impl SortOrder {
    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Options for [`Client::video_list_for_user`].
#[derive(Debug, Clone)]
pub struct VideoListOptions {
    /// Number of videos per page. The service caps this at 100 on its side;
    /// the value is passed through unclamped.
    pub count: u32,
    /// Only videos carrying these labels.
    pub labels: Option<String>,
    /// Only videos in this processing state.
    pub status: Option<String>,
}

impl Default for VideoListOptions {
    fn default() -> Self {
        Self {
            count: 20,
            labels: None,
            status: None,
        }
    }
}

impl VideoListOptions {
    /// Create options with the service defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set count
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set labels
    pub fn with_labels(mut self, labels: impl Into<String>) -> Self {
        self.labels = Some(labels.into());
        self
    }

    /// Set status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Options for [`Client::search_video_list`].
#[derive(Debug, Clone)]
pub struct VideoSearch {
    /// Only videos whose title contains this string.
    pub title: Option<String>,
    /// Only videos carrying these labels.
    pub labels: Option<String>,
    /// Number of videos per page, server-capped at 100, passed through
    /// unclamped.
    pub count: u32,
    /// Page number, starting at 1.
    pub page: u32,
    /// Listing order.
    pub sort: SortOrder,
}

impl Default for VideoSearch {
    fn default() -> Self {
        Self {
            title: None,
            labels: None,
            count: 20,
            page: 1,
            sort: SortOrder::default(),
        }
    }
}

impl VideoSearch {
    /// Create a search with the service defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set labels
    pub fn with_labels(mut self, labels: impl Into<String>) -> Self {
        self.labels = Some(labels.into());
        self
    }

    /// Set count
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set page
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set sort
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// Metadata changes for [`Client::edit_video`].
#[derive(Debug, Clone)]
pub struct VideoEdit {
    /// New title.
    pub title: String,
    /// New description.
    pub description: String,
    /// Make the video private.
    pub private: bool,
    /// SEO path segment for the video page.
    pub seo_url: Option<String>,
}

impl VideoEdit {
    /// Create an edit carrying the two required fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            private: false,
            seo_url: None,
        }
    }

    /// Set private
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Set seo_url
    pub fn with_seo_url(mut self, seo_url: impl Into<String>) -> Self {
        self.seo_url = Some(seo_url.into());
        self
    }
}

/// Processing request for [`Client::process_video`].
#[derive(Debug, Clone)]
pub struct VideoProcess {
    /// GUID of the uploaded raw file, as returned by the upload flow.
    pub guid: String,
    /// Title for the resulting video.
    pub title: String,
    /// Description for the resulting video.
    pub description: String,
    /// Comma-separated labels.
    pub labels: String,
    /// Encoding size profile.
    pub profile: Profile,
    /// Force a transcode even when the source container could be served
    /// as-is.
    pub transcoding: bool,
    /// Id of an existing video this upload replaces.
    pub replace_id: Option<String>,
}

impl VideoProcess {
    /// Create a processing request with the default profile.
    pub fn new(
        guid: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        labels: impl Into<String>,
    ) -> Self {
        Self {
            guid: guid.into(),
            title: title.into(),
            description: description.into(),
            labels: labels.into(),
            profile: Profile::default(),
            transcoding: false,
            replace_id: None,
        }
    }

    /// Set profile
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Set transcoding
    pub fn with_transcoding(mut self, transcoding: bool) -> Self {
        self.transcoding = transcoding;
        self
    }

    /// Set replace_id
    pub fn with_replace_id(mut self, replace_id: impl Into<String>) -> Self {
        self.replace_id = Some(replace_id.into());
        self
    }
}

/// The vzaar API client.
///
/// Every operation is one request/response round trip; there is no shared
/// mutable state across calls, so a `Client` can be used concurrently.
/// Signed operations use HMAC-SHA1 with the configured token/secret and the
/// anonymous consumer pair the service expects.
#[derive(Debug)]
pub struct Client {
    ctx: Context,
    config: Config,
    signer: RequestSigner,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, config: Config) -> Self {
        Self {
            ctx,
            config,
            signer: RequestSigner::new(SignatureMethod::HmacSha1),
        }
    }

    /// Replace the request signer.
    ///
    /// # Note
    ///
    /// The default signer is correct for the live service. Only use this
    /// function to pin nonce and timestamp in tests.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// The authenticated login name for the configured credentials.
    pub async fn who_am_i(&self) -> Result<String> {
        let url = self.url("api/test/whoami.json");
        let raw = self.call(Method::GET, &url, true, None).await?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| Error::parse_invalid("whoami response is not valid JSON").with_source(e))?;

        // The service is inconsistent about the envelope key here.
        let api = value
            .get("vzaar_api")
            .or_else(|| value.get("vzaar-api"))
            .ok_or_else(|| Error::response_malformed("whoami response missing api envelope"))?;

        if let Some(error) = api.get("error") {
            let kind = error
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("unknown");
            return Err(Error::remote(format!(
                "authentication failed with message {kind}"
            )));
        }

        api.pointer("/test/login")
            .and_then(|login| login.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::response_malformed("whoami response missing test login"))
    }

    /// Details and rights for an account type.
    pub async fn account_details(&self, account: u64) -> Result<Account> {
        let url = self.url(&format!("api/accounts/{account}.json"));
        let raw = self.call(Method::GET, &url, false, None).await?;
        parse_json(&raw)
    }

    /// A user's public details.
    pub async fn user_details(&self, user: &str) -> Result<User> {
        let url = self.url(&format!("api/{user}.json"));
        let raw = self.call(Method::GET, &url, false, None).await?;
        parse_json(&raw)
    }

    /// A user's active videos.
    ///
    /// `user` must be the username, not the email address. Pass `auth` to
    /// sign the call and include private videos.
    pub async fn video_list_for_user(
        &self,
        user: &str,
        auth: bool,
        options: &VideoListOptions,
    ) -> Result<Vec<Video>> {
        let mut params = vec![("count", options.count.to_string())];
        if let Some(labels) = &options.labels {
            params.push(("labels", labels.clone()));
        }
        if let Some(status) = &options.status {
            params.push(("status", status.clone()));
        }

        let url = self.url_with_query(&format!("api/{user}/videos.json"), &params);
        let raw = self.call(Method::GET, &url, auth, None).await?;
        parse_json(&raw)
    }

    /// Search a user's active videos.
    pub async fn search_video_list(
        &self,
        user: &str,
        auth: bool,
        search: &VideoSearch,
    ) -> Result<Vec<Video>> {
        let mut params = vec![
            ("count", search.count.to_string()),
            ("page", search.page.to_string()),
            ("sort", search.sort.as_str().to_string()),
        ];
        if let Some(labels) = &search.labels {
            params.push(("labels", labels.clone()));
        }
        if let Some(title) = &search.title {
            params.push(("title", title.clone()));
        }

        let url = self.url_with_query(&format!("api/{user}/videos.json"), &params);
        let raw = self.call(Method::GET, &url, auth, None).await?;
        parse_json(&raw)
    }

    /// Full metadata for one video, oEmbed shaped.
    pub async fn video_details(&self, id: u64, auth: bool) -> Result<VideoDetails> {
        let url = self.url(&format!("api/videos/{id}.json"));
        let raw = self.call(Method::GET, &url, auth, None).await?;
        parse_json(&raw)
    }

    /// Delete a video. Returns the raw confirmation payload.
    pub async fn delete_video(&self, id: u64) -> Result<String> {
        let url = self.url(&format!("api/videos/{id}.xml"));
        let data = body::delete_body()?;
        self.call(Method::DELETE, &url, true, Some(data)).await
    }

    /// Edit a video's metadata. Returns the raw confirmation payload.
    pub async fn edit_video(&self, id: u64, edit: &VideoEdit) -> Result<String> {
        let url = self.url(&format!("api/videos/{id}.xml"));
        let data = body::edit_body(
            &edit.title,
            &edit.description,
            edit.private,
            edit.seo_url.as_deref(),
        )?;
        self.call(Method::POST, &url, true, Some(data)).await
    }

    /// Tell the service to process a previously uploaded file.
    ///
    /// Encodes the raw upload (per the requested [`Profile`]) and returns
    /// the id of the resulting video. This is the caller-driven step after
    /// [`Client::upload_video`]; the upload itself never chains into it.
    pub async fn process_video(&self, process: &VideoProcess) -> Result<String> {
        let url = self.url("api/videos");
        let data = body::process_body(
            &process.guid,
            &process.title,
            &process.description,
            &process.labels,
            process.profile.code(),
            process.transcoding,
            process.replace_id.as_deref(),
        )?;
        let raw = self.call(Method::POST, &url, true, Some(data)).await?;

        #[derive(serde::Deserialize)]
        struct ProcessResponse {
            #[serde(default)]
            video: Option<String>,
        }

        let response: ProcessResponse = quick_xml::de::from_str(&raw)
            .map_err(|e| Error::parse_invalid("process response is not valid XML").with_source(e))?;
        response
            .video
            .ok_or_else(|| Error::response_malformed("process response missing video element"))
    }

    /// Fetch a signed upload policy.
    ///
    /// The policy authorizes exactly one direct-to-storage POST and is
    /// discarded afterwards.
    pub async fn upload_signature(&self, redirect_url: Option<&str>) -> Result<UploadSignature> {
        let mut params = Vec::new();
        if self.config.flash_support {
            params.push(("flash_request", "true".to_string()));
        }
        if let Some(redirect_url) = redirect_url {
            params.push(("success_action_redirect", redirect_url.to_string()));
        }

        let url = self.url_with_query("api/videos/signature", &params);
        let raw = self.call(Method::GET, &url, true, None).await?;
        UploadSignature::from_xml(&raw)
    }

    /// Upload a video file from disk.
    ///
    /// Reads the file through the configured [`FileRead`] capability, then
    /// runs the same flow as [`Client::upload_video_data`].
    ///
    /// [`FileRead`]: vzaar_core::FileRead
    pub async fn upload_video(&self, path: &str) -> Result<String> {
        let data = self.ctx.file_read(path).await?;
        let file_name = path
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(path);

        self.upload_video_data(file_name, Bytes::from(data)).await
    }

    /// Upload raw video bytes.
    ///
    /// Two phases: fetch an [`UploadSignature`], then POST the bytes as a
    /// multipart form directly to the storage bucket. Authorization for the
    /// second phase is carried entirely by the policy fields, so that POST
    /// is not OAuth-signed. Returns the GUID the storage service assigned;
    /// feed it to [`Client::process_video`] to make a playable video out of
    /// it.
    ///
    /// Failures are returned to the caller untouched: a transient transport
    /// error is not retried here because a retry needs a fresh policy.
    pub async fn upload_video_data(&self, file_name: &str, data: Bytes) -> Result<String> {
        let signature = self.upload_signature(None).await?;
        debug!("upload policy issued for bucket {}", signature.bucket);

        let boundary = upload::generate_boundary();
        let form = upload::multipart_body(&signature, file_name, &data, &boundary);

        let req = http::Request::builder()
            .method(Method::POST)
            .uri(format!("https://{}.s3.amazonaws.com/", signature.bucket))
            .header(header::USER_AGENT, USER_AGENT_UPLOAD)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header("x-amz-acl", signature.acl.as_str())
            .body(form)?;

        let response = self.ctx.http_send_as_string(req).await?;
        debug!("storage upload finished, extracting assigned key");

        upload::extract_upload_guid(response.body())
    }

    /// Public endpoint for a user's details.
    pub fn endpoint_for_user(&self, user: &str) -> String {
        self.url(&format!("users/{user}.json"))
    }

    /// Public endpoint for a user's videos.
    pub fn endpoint_for_videos(&self, user: &str, count: u32) -> String {
        self.url(&format!("api/{user}/videos.json?count={count}"))
    }

    fn credential(&self) -> Result<Credential> {
        let (Some(token), Some(secret)) = (&self.config.token, &self.config.secret) else {
            return Err(Error::credential_invalid(
                "token and secret are required for signed calls",
            ));
        };

        // The service issues no consumer credentials; only the token pair
        // participates in the signature.
        Ok(Credential::new(
            Consumer::new("", ""),
            Some(Token::new(token.as_str(), secret.as_str())),
        ))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    fn url_with_query(&self, path: &str, params: &[(&str, String)]) -> String {
        if params.is_empty() {
            return self.url(path);
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            query.append_pair(key, value);
        }

        format!("{}?{}", self.url(path), query.finish())
    }

    async fn call(
        &self,
        method: Method,
        url: &str,
        auth: bool,
        data: Option<String>,
    ) -> Result<String> {
        let mut builder = http::Request::builder()
            .method(method)
            .uri(url)
            .header(header::USER_AGENT, USER_AGENT_OAUTH);
        if data.is_some() {
            builder = builder
                .header(header::CONTENT_TYPE, "application/xml")
                .header(header::CONNECTION, "close");
        }

        let req = builder.body(Bytes::from(data.unwrap_or_default()))?;
        let (mut parts, data) = req.into_parts();

        if auth {
            let credential = self.credential()?;
            self.signer.sign(&mut parts, Some(&credential))?;
        }

        let response = self
            .ctx
            .http_send_as_string(http::Request::from_parts(parts, data))
            .await?;

        // Errors are embedded in 200 bodies; classification happens at the
        // parsers, not here.
        Ok(response.into_body())
    }
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| Error::parse_invalid("response is not valid JSON").with_source(e))
}
