use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown parser reference (module: {module}, format: {format})")]
    UnknownParser { module: String, format: String },
    #[error("registry entry #{index} has an empty standard_id")]
    EmptyStandardId { index: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
