use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("not found")]
    NotFound,
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("connection error: {0}")]
    Connection(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
