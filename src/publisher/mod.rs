pub mod archive;
pub mod twitter;

use crate::model::{Artifact, PublishError, ReportKind};

pub use archive::ArtifactWriter;
pub use twitter::TwitterPublisher;

#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    /// Publishes the artifact in one go and returns the post identifier.
    async fn publish(&self, kind: ReportKind, artifact: &Artifact) -> Result<String, PublishError>;
}
