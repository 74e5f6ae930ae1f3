use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use wavyjack_core::GameError;

/// 请求处理过程中的错误，转换为 HTTP 响应
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Game(#[from] GameError),
    /// 请求体不是合法的 frame action JSON
    #[error("invalid frame payload: {0}")]
    BadPayload(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Game(GameError::MalformedState(_)) | AppError::BadPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Game(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "处理请求失败");
        } else {
            tracing::warn!(error = %self, "拒绝请求");
        }
        (status, self.to_string()).into_response()
    }
}
