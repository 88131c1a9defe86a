//! services/learner/src/adapters/http.rs
//!
//! The shared REST client used by every HTTP adapter. It owns the base URL,
//! the request timeout and the bearer-token lookup, and unwraps the
//! backend's `{ success, message, data }` envelope.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use vocab_core::ports::{PortError, PortResult};
use vocab_core::AuthContext;

/// The envelope every backend response is wrapped in.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Returns the payload, or the server's message as an error.
    pub fn into_data(self) -> PortResult<T> {
        if !self.success {
            return Err(PortError::Unexpected(
                self.message.unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        self.data.ok_or_else(|| {
            PortError::Unexpected(
                self.message.unwrap_or_else(|| "response carried no data".to_string()),
            )
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// REST client for the vocabulary API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth: Option<Arc<AuthContext>>,
}

impl ApiClient {
    /// Creates a client. `auth` supplies the bearer token when a user is signed in.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        auth: Option<Arc<AuthContext>>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and unwrap the envelope.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PortResult<T> {
        let request = self.http.get(self.url(path)).query(query);
        self.send::<ApiResponse<T>>(request, path).await?.into_data()
    }

    /// GET `path` and return the raw JSON body, for endpoints with unstable shapes.
    pub async fn get_raw(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PortResult<serde_json::Value> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(request, path).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> PortResult<T> {
        let request = self.http.post(self.url(path)).json(body);
        self.send::<ApiResponse<T>>(request, path).await?.into_data()
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let request = self.http.delete(self.url(path));
        self.send::<ApiResponse<T>>(request, path).await?.into_data()
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> PortResult<T> {
        let request = self.authorize(request).await;

        let response = request.send().await.map_err(|e| {
            error!("API request to {} failed: {}", path, e);
            transport_error(e)
        })?;

        let status = response.status();
        debug!("{} -> {}", path, status);
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                PortError::Unexpected(format!("Malformed response from {}: {}", path, e))
            });
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());
        error!("API error on {}: {} ({})", path, status, message);

        Err(match status {
            StatusCode::UNAUTHORIZED => PortError::Unauthorized,
            StatusCode::NOT_FOUND => PortError::NotFound(message),
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT => {
                PortError::Unavailable(message)
            }
            _ => PortError::Unexpected(format!("{}: {}", status, message)),
        })
    }

    /// Attaches the current user's token. A failed lookup sends the request anonymously.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let Some(auth) = &self.auth else {
            return request;
        };
        match auth.token().await {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                warn!("Error getting ID token: {}", e);
                request
            }
        }
    }
}

fn transport_error(e: reqwest::Error) -> PortError {
    if e.is_timeout() {
        PortError::Unavailable("request timed out".to_string())
    } else if e.is_connect() {
        PortError::Unavailable(format!("could not connect: {}", e))
    } else {
        PortError::Unexpected(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_without_success_is_an_error() {
        let response: ApiResponse<u32> =
            serde_json::from_str(r#"{"success": false, "message": "Word not eligible"}"#).unwrap();
        assert!(matches!(
            response.into_data(),
            Err(PortError::Unexpected(m)) if m == "Word not eligible"
        ));
    }

    #[test]
    fn envelope_with_data_unwraps() {
        let response: ApiResponse<u32> =
            serde_json::from_str(r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(response.into_data().unwrap(), 7);
    }

    #[test]
    fn envelope_missing_data_is_an_error() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.into_data().is_err());
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = ApiClient::new("http://localhost:5000/api/", Duration::from_secs(1), None).unwrap();
        assert_eq!(client.url("/words"), "http://localhost:5000/api/words");
    }
}
