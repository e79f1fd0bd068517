//! HTTP client for the permutas API
//!
//! Every call carries `Authorization: Bearer <token>`. Non-success responses
//! are turned into [`ApiError::Status`] with the response body kept so callers
//! can log what the server said.

use super::error::ApiError;
use super::traits::InterestApi;
use crate::state::{Institution, InterestRecord, NewInterest};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};

/// Default API address
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Client for the permutas API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl InterestApi for ApiClient {
    async fn list_interests(&self, token: &str) -> Result<Vec<InterestRecord>, ApiError> {
        let response = self
            .http
            .get(self.url("/interest"))
            .bearer_auth(token)
            .send()
            .await?;
        let interests = check_status(response).await?.json().await?;
        Ok(interests)
    }

    async fn delete_interest(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/interest/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn create_interest(&self, token: &str, interest: &NewInterest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/interest"))
            .bearer_auth(token)
            .json(interest)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn list_institutions(&self, token: &str) -> Result<Vec<Institution>, ApiError> {
        let response = self
            .http
            .get(self.url("/institution"))
            .bearer_auth(token)
            .send()
            .await?;
        let institutions = check_status(response).await?.json().await?;
        Ok(institutions)
    }
}

/// Pass successful responses through, turn the rest into `ApiError::Status`
pub(super) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

/// Validate a base url and strip its trailing slash
pub(super) fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(super) mod test_server {
    use std::io;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response; the handle yields the raw request text
    pub async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<io::Result<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await?;
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await?;
            socket.shutdown().await.ok();
            Ok::<_, io::Error>(String::from_utf8_lossy(&raw).to_string())
        });

        (format!("http://{addr}"), handle)
    }

    /// The request the server saw, failing the test with the server's own error
    pub async fn received(server: JoinHandle<io::Result<String>>) -> String {
        match server.await {
            Ok(Ok(request)) => request,
            Ok(Err(err)) => panic!("test server failed: {err}"),
            Err(err) => panic!("test server task did not finish: {err}"),
        }
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }
}
