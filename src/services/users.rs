use crate::http::ApiClient;
use glim_core::api::endpoints;
use glim_core::error::ApiResult;
use glim_core::user::{
    PreferencesUpdate, ProfileUpdate, UserPreferences, UserProfile, UserStats,
};

pub async fn profile(client: &ApiClient, user_id: &str) -> ApiResult<UserProfile> {
    client.send(&endpoints::profile(user_id)).await
}

pub async fn update_profile(
    client: &ApiClient,
    user_id: &str,
    update: &ProfileUpdate,
) -> ApiResult<UserProfile> {
    client
        .send(&endpoints::update_profile(user_id, update))
        .await
}

pub async fn preferences(client: &ApiClient, user_id: &str) -> ApiResult<UserPreferences> {
    client.send(&endpoints::preferences(user_id)).await
}

pub async fn update_preferences(
    client: &ApiClient,
    user_id: &str,
    update: &PreferencesUpdate,
) -> ApiResult<UserPreferences> {
    client
        .send(&endpoints::update_preferences(user_id, update))
        .await
}

pub async fn stats(client: &ApiClient, user_id: &str) -> ApiResult<UserStats> {
    client.send(&endpoints::stats(user_id)).await
}

pub async fn follow(client: &ApiClient, target_user_id: &str) -> ApiResult<()> {
    client.send_empty(&endpoints::follow(target_user_id)).await
}

pub async fn unfollow(client: &ApiClient, target_user_id: &str) -> ApiResult<()> {
    client.send_empty(&endpoints::unfollow(target_user_id)).await
}

pub async fn search(client: &ApiClient, query: &str) -> ApiResult<Vec<UserProfile>> {
    client.send(&endpoints::search_users(query)).await
}

pub async fn feed(
    client: &ApiClient,
    user_id: &str,
    page: Option<u32>,
    limit: Option<u32>,
) -> ApiResult<Vec<UserProfile>> {
    client.send(&endpoints::feed(user_id, page, limit)).await
}
