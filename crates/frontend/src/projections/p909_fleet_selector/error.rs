use contracts::projections::p909_fleet_selector::dto::ApiErrorBody;
use thiserror::Error;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Ошибка обращения к серверу подбора техники
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    #[error("HTTP error: {status}")]
    Server {
        status: u16,
        body: Option<ApiErrorBody>,
    },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Приводит ошибку к одной строке для пользователя.
///
/// Список ошибок сервера склеивается через ", ", одиночная ошибка отдаёт свой
/// `message`, иначе используется текст самой ошибки.
pub fn normalize_error(error: &ApiError) -> String {
    let message = match error {
        ApiError::Server {
            body: Some(ApiErrorBody::List(items)),
            ..
        } => items
            .iter()
            .map(|item| item.message.clone().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", "),
        ApiError::Server {
            body: Some(ApiErrorBody::Single(item)),
            ..
        } => match item.message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => error.to_string(),
        },
        _ => error.to_string(),
    };

    if message.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}
