use crate::model::{Artifact, PublishError, ReportKind};
use crate::publisher::Publisher;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Dry-run sink: writes `<slug>.png` and `<slug>.txt` instead of posting.
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait::async_trait]
impl Publisher for ArtifactWriter {
    async fn publish(&self, kind: ReportKind, artifact: &Artifact) -> Result<String, PublishError> {
        fs::create_dir_all(&self.dir).await?;

        let image_path = self.dir.join(format!("{}.png", kind.slug()));
        let caption_path = self.dir.join(format!("{}.txt", kind.slug()));
        fs::write(&image_path, &artifact.image).await?;
        fs::write(&caption_path, &artifact.caption).await?;

        info!("Saved artifact: {}", image_path.display());
        Ok(image_path.display().to_string())
    }
}
