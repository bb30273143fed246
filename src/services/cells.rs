use super::now;
use crate::http::ApiClient;
use glim_core::api::{
    endpoints, map_api_cell, map_api_vista_session, ApiCell, ApiVistaSession, CellUpdate,
};
use glim_core::environment::EnvironmentEditor;
use glim_core::error::ApiResult;
use glim_core::glow::GlowKind;
use glim_core::model::Cell;
use glim_core::vista::VistaSession;

fn map_all(cells: Vec<ApiCell>) -> Vec<Cell> {
    let ts = now();
    cells.into_iter().map(|c| map_api_cell(c, ts)).collect()
}

/// The caller's own cell, created by the backend on first use.
pub async fn create_initial_cell(client: &ApiClient) -> ApiResult<Cell> {
    let api: ApiCell = client.send(&endpoints::create_initial_cell()).await?;
    Ok(map_api_cell(api, now()))
}

pub async fn user_cells(client: &ApiClient) -> ApiResult<Vec<Cell>> {
    let api: Vec<ApiCell> = client.send(&endpoints::user_cells()).await?;
    Ok(map_all(api))
}

pub async fn nearby_cells(
    client: &ApiClient,
    position: [f32; 3],
    radius: Option<f32>,
) -> ApiResult<Vec<Cell>> {
    let api: Vec<ApiCell> = client
        .send(&endpoints::nearby_cells(position, radius))
        .await?;
    log::info!("[cells] {} nearby", api.len());
    Ok(map_all(api))
}

pub async fn update_cell(client: &ApiClient, cell_id: &str, update: &CellUpdate) -> ApiResult<Cell> {
    let api: ApiCell = client.send(&endpoints::update_cell(cell_id, update)).await?;
    Ok(map_api_cell(api, now()))
}

/// Persist the editor's object list.
pub async fn save_environment(client: &ApiClient, editor: &EnvironmentEditor) -> ApiResult<Cell> {
    let api: ApiCell = client.send(&editor.save_request()).await?;
    Ok(map_api_cell(api, now()))
}

/// `emotion` is an emotion key or a glow kind key.
pub async fn send_glow(
    client: &ApiClient,
    cell_id: &str,
    emotion: &str,
    intensity: f32,
) -> ApiResult<()> {
    client
        .send_empty(&endpoints::send_glow(cell_id, emotion, intensity))
        .await
}

pub async fn send_glow_kind(client: &ApiClient, cell_id: &str, kind: GlowKind) -> ApiResult<()> {
    client
        .send_empty(&endpoints::send_glow_kind(cell_id, kind))
        .await
}

/// Open a vista session hosted by `own_cell_id`, with any cells the backend
/// sent along.
pub async fn start_vista_session(
    client: &ApiClient,
    own_cell_id: &str,
) -> ApiResult<(VistaSession, Vec<Cell>)> {
    let api: ApiVistaSession = client.send(&endpoints::start_vista_session()).await?;
    Ok(map_api_vista_session(api, own_cell_id, now()))
}
