use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("annotation {id} is a {actual}, patch carries a {patched} shape")]
    ShapeKindMismatch {
        id: String,
        actual: &'static str,
        patched: &'static str,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
