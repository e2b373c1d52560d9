//! Shared HTTP client for the admin backend.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// HTTP client bound to the backend's base URL.
///
/// The client keeps a cookie store so the session cookie set by a successful
/// login rides along on every subsequent call, mirroring the browser
/// console's `withCredentials` axios instance. Every request carries the
/// configured timeout; a request that never resolves becomes a
/// [`Error::Remote`] like any other failure instead of hanging the UI.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Builds a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Posts admin credentials; success is signaled by the server-set session
    /// cookie, which the cookie store retains for all later calls.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let url = self.url("admin/login");
        tracing::debug!(%url, "logging in");
        let resp = self
            .http
            .post(&url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        check_status(resp).await?;
        tracing::info!("admin login succeeded");
        Ok(())
    }

    /// `GET {base}/{path}`, decoding the JSON response body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let resp = self.http.get(&url).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }

    /// `POST {base}/{path}` with a JSON body, decoding the response.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let resp = self.http.post(&url).json(body).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }

    /// `PUT {base}/{path}` with a JSON body, decoding the response.
    pub(crate) async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let resp = self.http.put(&url).json(body).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }

    /// `PUT {base}/{path}` where only the status matters.
    pub(crate) async fn put_status(&self, path: &str, body: &Value) -> Result<()> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let resp = self.http.put(&url).json(body).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    /// `DELETE {base}/{path}`; success is the HTTP status alone.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let resp = self.http.delete(&url).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    /// `DELETE {base}/{path}` with a JSON body. The relationship endpoints
    /// carry both ids in the delete body rather than the path.
    pub(crate) async fn delete_with_body(&self, path: &str, body: &Value) -> Result<()> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let resp = self.http.delete(&url).json(body).send().await?;
        check_status(resp).await?;
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().clone();
    tracing::warn!(%url, %status, "request failed");
    Err(Error::Remote(format!("{} returned {}", url.path(), status)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base: &str) -> RestClient {
        RestClient::new(&Config {
            base_url: base.to_string(),
            page_size: 5,
            timeout: Duration::from_secs(10),
        })
        .unwrap()
    }

    #[test]
    fn url_joins_without_doubled_slashes() {
        let c = client("http://localhost:5000/api/");
        assert_eq!(c.url("/teachers"), "http://localhost:5000/api/teachers");
        assert_eq!(c.url("teachers"), "http://localhost:5000/api/teachers");
    }
}
