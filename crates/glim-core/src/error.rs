//! Errors surfaced to the user. Every variant renders as a ready-to-show
//! message; nothing here is meant to be fatal.

use serde::Deserialize;
use thiserror::Error;

pub const MSG_BAD_REQUEST: &str = "Dados inválidos";
pub const MSG_UNAUTHORIZED: &str = "Não autorizado";
pub const MSG_NOT_FOUND: &str = "Recurso não encontrado";
pub const MSG_NO_RESPONSE: &str = "Erro ao conectar com o servidor";

/// Fixed page-level messages shown inline when a screen's load or save fails.
pub mod messages {
    pub const LOAD_CELLS: &str = "Erro ao carregar células";
    pub const LOAD_VISTA: &str = "Erro ao carregar o ambiente Vista";
    pub const LOAD_ENVIRONMENT: &str = "Erro ao carregar o ambiente";
    pub const CELL_NOT_FOUND: &str = "Célula não encontrada";
    pub const SAVE_ENVIRONMENT: &str = "Erro ao salvar o ambiente";
    pub const LOAD_USER: &str = "Erro ao carregar dados do usuário";
    pub const UPDATE_PROFILE: &str = "Erro ao atualizar perfil";
    pub const UPDATE_PREFERENCES: &str = "Erro ao atualizar preferências";
    pub const PROFILE_UPDATED: &str = "Perfil atualizado com sucesso!";
    pub const PREFERENCES_UPDATED: &str = "Preferências atualizadas com sucesso!";
    pub const LOGIN_REQUIRED_VISTA: &str = "Você precisa estar logado para acessar o Vista";
    pub const LOGIN_FAILED: &str = "Erro ao fazer login";
    pub const REGISTER_FAILED: &str = "Erro ao criar conta";
    pub const SPOTIFY_UNAVAILABLE: &str = "Não foi possível carregar a prévia do Spotify";
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{}", MSG_NO_RESPONSE)]
    NoResponse,
    #[error("{}", status_message(.status, .message))]
    Status { status: u16, message: Option<String> },
    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => format!("Erro inesperado do servidor ({status})"),
    }
}

impl ApiError {
    /// Map a non-success HTTP status and its body. The server's `error` field
    /// wins over the default text when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let server = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.is_empty());
        match status {
            400 => ApiError::BadRequest(server.unwrap_or_else(|| MSG_BAD_REQUEST.into())),
            401 => ApiError::Unauthorized(server.unwrap_or_else(|| MSG_UNAUTHORIZED.into())),
            404 => ApiError::NotFound(server.unwrap_or_else(|| MSG_NOT_FOUND.into())),
            _ => ApiError::Status {
                status,
                message: server,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::NoResponse | ApiError::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Text for a failed login or register: the server's message when it sent
    /// one, the connection message when nothing came back, else `fallback`.
    pub fn auth_message(&self, fallback: &str) -> String {
        match self {
            ApiError::NoResponse => MSG_NO_RESPONSE.to_string(),
            ApiError::BadRequest(m) | ApiError::Unauthorized(m) | ApiError::NotFound(m) => {
                m.clone()
            }
            ApiError::Status {
                message: Some(m), ..
            } => m.clone(),
            ApiError::Status { message: None, .. } | ApiError::Decode(_) => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
