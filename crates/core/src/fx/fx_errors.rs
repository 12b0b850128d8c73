use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    /// A fetch failed. Carries the provider's message because the failure may
    /// be shared by several concurrent callers.
    #[error("Fetch error: {0}")]
    FetchError(String),
}
