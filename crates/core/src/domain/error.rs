// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Compiler command is empty")]
    EmptyCompiler,

    #[error("Validation error: {0}")]
    ValidationError(String),
}
