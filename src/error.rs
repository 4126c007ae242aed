use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{}", api_error_text(.status, .message))]
    Api { status: u16, message: Option<String> },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A view caught a failure and holds it as its error notice.
    #[error("{0}")]
    Reported(String),
}

fn api_error_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => message.clone(),
        _ => format!("Request failed with status code {}", status),
    }
}
