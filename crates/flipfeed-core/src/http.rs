//! Shared HTTP plumbing for the backend clients

use std::time::Duration;

use reqwest::{Client, Proxy, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{Error, Result};

const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Build an HTTP client with the per-call timeout and optional proxy
pub(crate) fn build_client(timeout: Duration, proxy_url: &Option<String>) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(ref proxy) = proxy_url {
        let proxy = Proxy::all(proxy)
            .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
        builder = builder.proxy(proxy);
        tracing::info!("Using HTTP proxy for backend requests");
    }

    builder.build().map_err(Error::Http)
}

/// Join an endpoint path onto the configured base URL
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let base = Url::parse(base_url.trim_end_matches('/'))?;
    if !path.starts_with('/') {
        return Ok(base.join(&format!("/{}", path))?);
    }
    Ok(base.join(path)?)
}

/// Reject non-2xx responses, then decode the JSON body
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            url,
        });
    }

    let body = response.bytes().await?;
    if body.len() > MAX_BODY_BYTES {
        return Err(Error::MalformedBody(format!(
            "response too large ({} bytes) from {}",
            body.len(),
            url
        )));
    }

    serde_json::from_slice(&body)
        .map_err(|e| Error::MalformedBody(format!("{} from {}", e, url)))
}
