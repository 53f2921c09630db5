use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressionError {
    /// The user store could not be reached or rejected a read or write.
    #[error("user store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),
}

impl ProgressionError {
    pub(crate) fn store(source: anyhow::Error) -> Self {
        Self::StoreUnavailable(source)
    }
}
