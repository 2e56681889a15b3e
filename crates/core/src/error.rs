use thiserror::Error;

use crate::model::{ConfigError, PageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
