use crate::utils::error::{DishError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 300;

pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("dish-explorer/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Turns a non-2xx response into `DishError::UpstreamError`.
pub async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("{} response status: {}", service, status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DishError::UpstreamError {
        service: service.to_string(),
        status: status.as_u16(),
        body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    })
}

/// 將回應解析為型別化的結構，缺欄位時回傳 MalformedResponseError
pub async fn decode_json<T: DeserializeOwned>(service: &str, response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| DishError::MalformedResponseError {
        service: service.to_string(),
        message: e.to_string(),
    })
}
