use thiserror::Error;

use crate::regex::LimitExceeded;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("evaluation inconclusive: {0}")]
    Limit(#[from] LimitExceeded),
}

pub type Result<T> = std::result::Result<T, Error>;
