// Async HTTP client for the eventdesk REST backend.
//
// Base path: whatever the deployment mounts the API under (e.g. `/api/`).
// Auth: `Authorization: Bearer <token>`, attached per request.
//
// Endpoint methods live in sibling modules (dashboard, feedback, account)
// as inherent impls, keeping this file focused on transport mechanics.

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::BearerToken;
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the event-management API.
///
/// Holds no credentials: the bearer token is passed explicitly to each
/// authorized call so callers stay in control of where it comes from.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and make sure its path ends with `/`, so that
    /// endpoint segments are appended rather than replacing the last one.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::CannotBeABase(raw.to_owned()));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL. Each segment is
    /// percent-encoded, so identifiers can never escape their slot.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&BearerToken>,
    ) -> Result<T, Error> {
        debug!("GET {url}");

        let mut request = self.http.get(url);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token.header_value()?);
        }
        let resp = request.send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        token: Option<&BearerToken>,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let mut request = self.http.post(url).json(body);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token.header_value()?);
        }
        let resp = request.send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) => err.message.filter(|m| !m.trim().is_empty()),
            // Plain-text bodies are passed through; HTML error pages are not
            Err(_) if !raw.trim().is_empty() && !raw.trim_start().starts_with('<') => {
                Some(raw.trim().to_owned())
            }
            Err(_) => None,
        };

        debug!(status = status.as_u16(), ?message, "request failed");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthorized { message };
        }

        Error::Status {
            status: status.as_u16(),
            message,
        }
    }
}
