use thiserror::Error;

pub type TakeoverResult<T> = Result<T, TakeoverError>;

#[derive(Error, Debug)]
pub enum TakeoverError {
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("invalid value: {0}")]
    InvalidInput(String),
    #[error("no data: {0}")]
    NoData(String),
    #[error("back-end DBMS has not been identified yet")]
    UnknownDbms,
    #[error(transparent)]
    Executor(#[from] anyhow::Error),
}
