use thiserror::Error;
use vacpoints_core::error::DomainError;
use vacpoints_ports::error::{ParseError, PortError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("port error: {0}")]
    Port(#[from] PortError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("navigation error: {0}")]
    Navigation(String),
}
