use std::time::Duration;
use ureq::Agent;

use harbor_core::{ApiRequest, ApiResponse, Dispatcher, Method, Session};

use crate::error::{HttpError, Result};

/// Harbor REST API client authenticated by a session cookie
pub struct HarborClient {
    agent: Agent,
    session: Session,
    language: Option<String>,
}

impl HarborClient {
    /// Create a new client that replays `session` as a cookie on every request.
    pub fn new(session: Session) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            session,
            language: None,
        }
    }

    /// Also send Harbor's `harbor-lang` cookie.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    fn cookie(&self) -> String {
        self.session.cookie_header(self.language.as_deref())
    }

    /// Send `request` and collect status and body, whatever the status is.
    pub fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        log::info!("==> {} {}", request.method, request.url);
        if let Some(body) = &request.body {
            log::debug!("request body: {}", body);
        }

        let cookie = self.cookie();
        let response = match (request.method, request.body.as_deref()) {
            (Method::Get, _) => self
                .agent
                .get(&request.url)
                .header("Cookie", &cookie)
                .header("Accept", "application/json")
                .call(),
            (Method::Delete, _) => self
                .agent
                .delete(&request.url)
                .header("Cookie", &cookie)
                .header("Accept", "application/json")
                .call(),
            (Method::Post, body) => self
                .agent
                .post(&request.url)
                .header("Cookie", &cookie)
                .header("Content-Type", "application/json")
                .header("Accept", "application/json")
                .send(body.unwrap_or_default()),
            (Method::Put, body) => self
                .agent
                .put(&request.url)
                .header("Cookie", &cookie)
                .header("Content-Type", "application/json")
                .header("Accept", "application/json")
                .send(body.unwrap_or_default()),
        }
        .map_err(HttpError::Transport)?;

        self.read_response(response)
    }

    fn read_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ApiResponse> {
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();

        // Empty bodies (204, most DELETEs) read as ""; non-UTF-8 bytes are replaced
        let bytes = response.body_mut().read_to_vec()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        log::debug!("<== {} ({} bytes)", status.as_u16(), body.len());

        Ok(ApiResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

impl Dispatcher for HarborClient {
    fn dispatch(&self, request: &ApiRequest) -> harbor_core::Result<ApiResponse> {
        self.send(request).map_err(Into::into)
    }
}
