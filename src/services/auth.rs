use crate::http::ApiClient;
use glim_core::api::{endpoints, AuthResponse};
use glim_core::error::ApiResult;

pub async fn login(client: &ApiClient, email: &str, password: &str) -> ApiResult<AuthResponse> {
    client.send(&endpoints::login(email, password)).await
}

pub async fn register(
    client: &ApiClient,
    email: &str,
    password: &str,
    display_name: &str,
) -> ApiResult<AuthResponse> {
    client
        .send(&endpoints::register(email, password, display_name))
        .await
}
