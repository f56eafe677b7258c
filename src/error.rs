use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid design JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid design JSON: {json} (as JSON5: {json5})")]
    Malformed {
        json: serde_json::Error,
        json5: json5::Error,
    },
    #[error("input contains no nodes")]
    Empty,
}
