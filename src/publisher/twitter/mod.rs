pub mod oauth;
pub mod sender;

use crate::config::Credentials;
use crate::model::{Artifact, PublishError, ReportKind};
use crate::publisher::Publisher;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

/// Posts to X (Twitter): media upload over v1.1, then the post over v2.
pub struct TwitterPublisher {
    pub credentials: Credentials,
    pub client: Client,
}

impl TwitterPublisher {
    pub fn new(credentials: Credentials) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        Ok(Self {
            credentials,
            client,
        })
    }
}

#[async_trait::async_trait]
impl Publisher for TwitterPublisher {
    async fn publish(&self, kind: ReportKind, artifact: &Artifact) -> Result<String, PublishError> {
        // The post is only attempted once the image is accepted.
        let media_id = sender::upload_media(self, &artifact.image).await?;
        let post_id = sender::create_tweet(self, &artifact.caption, &media_id).await?;
        info!("✅ {:?} posted: id={}", kind, post_id);
        Ok(post_id)
    }
}
