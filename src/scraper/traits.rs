use crate::model::{FetchError, FetchRequest};

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the response body of `req.url`.
    async fn fetch(&self, req: &FetchRequest) -> Result<String, FetchError>;
}
