use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response};
use url::Url;

use super::detail::describe_detail;
use super::models::{ProfileUpdate, User};
use crate::config::AppConfig;
use crate::http::{build_client, endpoint, read_json};
use crate::{Error, Result};

/// Client for the current-user resource of the auth backend
pub struct AccountClient {
    client: Client,
    url: Url,
    method: Method,
    token: Option<String>,
}

impl AccountClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = build_client(config.request_timeout(), &config.api.proxy_url)?;

        let method = match config.account.method.to_ascii_uppercase().as_str() {
            "PUT" => Method::PUT,
            "PATCH" => Method::PATCH,
            other => {
                return Err(Error::Config(format!(
                    "Unsupported account update method: {}",
                    other
                )))
            }
        };

        Ok(Self {
            client,
            url: endpoint(&config.api.base_url, &config.account.path)?,
            method,
            token: config
                .account
                .token
                .clone()
                .filter(|t| !t.trim().is_empty()),
        })
    }

    fn authorized(&self, method: Method) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or_else(|| {
            Error::Config("not logged in: set account.token or FLIPFEED_TOKEN".to_string())
        })?;

        Ok(self
            .client
            .request(method, self.url.clone())
            .header(ACCEPT, "application/json")
            .bearer_auth(token))
    }

    /// Fetch the signed-in user
    pub async fn current_user(&self) -> Result<User> {
        let response = self.authorized(Method::GET)?.send().await?;
        decode_user(response).await
    }

    /// Save the editable profile fields and return the updated user
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        tracing::debug!("Updating profile via {} {}", self.method, self.url);

        let response = self
            .authorized(self.method.clone())?
            .json(update)
            .send()
            .await?;

        let user = decode_user(response).await?;
        tracing::info!("Profile updated for {}", user.username);
        Ok(user)
    }
}

async fn decode_user(response: Response) -> Result<User> {
    let status = response.status();
    if status.is_success() {
        return read_json(response).await;
    }

    let url = response.url().to_string();
    let body = response.bytes().await?;
    let detail = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").cloned());

    match detail {
        Some(detail) => {
            let message = describe_detail(&detail);
            tracing::warn!("Account request rejected ({}): {}", status, message);
            Err(Error::Validation(message))
        }
        None => Err(Error::Status {
            status: status.as_u16(),
            url,
        }),
    }
}
