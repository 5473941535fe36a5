use derive_more::{Display, Error};

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Display, Error)]
pub enum EngineError {
    #[display("invalid giveaway request: {_0}")]
    Validation(#[error(not(source))] String),
    #[display("the giveaway is unknown or has already ended")]
    NotFound,
    #[display("storage failure: {_0}")]
    Store(#[error(not(source))] anyhow::Error),
}

impl From<anyhow::Error> for EngineError {
    fn from(err: anyhow::Error) -> Self {
        EngineError::Store(err)
    }
}
