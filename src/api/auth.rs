use serde::Deserialize;

use super::{ApiClient, ApiError};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange credentials for a bearer token.
pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<String, ApiError> {
    let body = serde_json::json!({
        "username": username,
        "password": password,
    });
    let resp: TokenResponse = api.post("token", &body).await?;
    Ok(resp.access_token)
}

/// Create an account, then log straight in with the new credentials.
pub async fn register(
    api: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    let body = serde_json::json!({
        "username": username,
        "email": email,
        "password": password,
    });
    let _: serde_json::Value = api.post("register", &body).await?;
    login(api, username, password).await
}
