use crate::aggregator::Aggregator;
use crate::composer::Composer;
use crate::config::AppConfig;
use crate::model::{Artifact, PipelineError, ReportKind, TriggerStatus};
use crate::publisher::Publisher;
use crate::render::ImageRenderer;
use crate::scraper::Fetcher;

use chrono::{FixedOffset, Utc};
use futures::FutureExt;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Fetch → compose → render → publish, once per trigger. Holds no state between runs.
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    renderer: Arc<dyn ImageRenderer>,
    publisher: Arc<dyn Publisher>,
    composer: Composer,
    fetch_timeout: Duration,
    utc_offset: FixedOffset,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        renderer: Arc<dyn ImageRenderer>,
        publisher: Arc<dyn Publisher>,
        config: &AppConfig,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            publisher,
            composer: Composer::new(config.watermark_handle.clone()),
            fetch_timeout: config.fetch_timeout,
            utc_offset: config.utc_offset,
        }
    }

    /// Trigger handler: always returns a status, whatever fails inside.
    pub async fn run(&self, kind: ReportKind) -> TriggerStatus {
        info!("▶️ Running {} job", kind.title());

        match AssertUnwindSafe(self.execute(kind)).catch_unwind().await {
            Ok(Ok(post_id)) => {
                info!("✅ {} published: {}", kind.title(), post_id);
                TriggerStatus::published(format!("{} posted.", kind.title()), post_id)
            }
            Ok(Err(e)) => {
                error!("❌ {} failed: {}", kind.title(), e);
                TriggerStatus::failed(format!("{} failed: {}", kind.title(), e))
            }
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                error!("😱 {} aborted: {}", kind.title(), reason);
                TriggerStatus::failed(format!("{} aborted: {}", kind.title(), reason))
            }
        }
    }

    async fn execute(&self, kind: ReportKind) -> Result<String, PipelineError> {
        let generated_at = Utc::now().with_timezone(&self.utc_offset);
        let report = Aggregator::new(self.fetcher.as_ref(), self.fetch_timeout)
            .collect(kind, generated_at)
            .await;

        let composition = self.composer.compose(&report);

        // Rasterising is CPU-bound; keep it off the async workers.
        let renderer = Arc::clone(&self.renderer);
        let task = tokio::task::spawn_blocking(move || {
            renderer
                .render(&report, &composition)
                .map(|image| (image, composition))
        });
        let (image, composition) = match task.await {
            Ok(rendered) => rendered?,
            Err(e) if e.is_panic() => panic::resume_unwind(e.into_panic()),
            Err(e) => return Err(PipelineError::RenderTask(e.to_string())),
        };

        let artifact = Artifact {
            image,
            caption: composition.caption,
        };

        Ok(self.publisher.publish(kind, &artifact).await?)
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
