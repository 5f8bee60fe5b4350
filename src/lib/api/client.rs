use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::{auth::read_token, error::ApiError, models::Config};

/// HTTP client for the scheduling backend.
///
/// Every request carries the bearer token read from the token file, if one was stored by a
/// previous login. An unreadable token file counts as no token, so `logout` can still remove it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let token = read_token(&config.token_path).unwrap_or_else(|err| {
            warn!(
                "Ignoring unreadable token file {}: {}",
                config.token_path.display(),
                err
            );
            None
        });
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            token,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_url = format!("{}{}", self.base_url, path);
        let req = self.client.request(method, request_url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn execute(&self, path: &str, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        debug!("{} answered {}", path, status);

        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_owned()));
        }
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        Err(ApiError::Status {
            status,
            path: path.to_owned(),
            body,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        info!("Getting {}", path);
        let resp = self
            .execute(path, self.build_request(Method::GET, path))
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        info!("Getting {} with {:?}", path, query);
        let req = self.build_request(Method::GET, path).query(query);
        let resp = self.execute(path, req).await?;
        Ok(resp.json().await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        info!("Posting to {}", path);
        let req = self.build_request(Method::POST, path).json(body);
        let resp = self.execute(path, req).await?;
        Ok(resp.json().await?)
    }

    /// Same as [`ApiClient::post_json`], but the response body is ignored.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        info!("Posting to {}", path);
        let req = self.build_request(Method::POST, path).json(body);
        self.execute(path, req).await?;
        Ok(())
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        info!("Putting to {}", path);
        let req = self.build_request(Method::PUT, path).json(body);
        self.execute(path, req).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        info!("Deleting {}", path);
        self.execute(path, self.build_request(Method::DELETE, path))
            .await?;
        Ok(())
    }
}
