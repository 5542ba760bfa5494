use crate::model::{ReportKind, TriggerStatus};
use crate::pipeline::Pipeline;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// One guard per report kind, held for the whole run.
#[derive(Default)]
struct RunGuards {
    global_market: Mutex<()>,
    mtf_insights: Mutex<()>,
}

impl RunGuards {
    fn for_kind(&self, kind: ReportKind) -> &Mutex<()> {
        match kind {
            ReportKind::GlobalMarket => &self.global_market,
            ReportKind::MtfInsights => &self.mtf_insights,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    running: Arc<RunGuards>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            running: Arc::new(RunGuards::default()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route(ReportKind::GlobalMarket.route(), get(global_market_update))
        .route(ReportKind::MtfInsights.route(), get(mtf_insights_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves until Ctrl-C.
pub async fn serve(state: AppState, bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("🚀 Listening on {}", listener.local_addr()?);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutting down");
}

async fn health() -> Json<TriggerStatus> {
    Json(TriggerStatus {
        ok: true,
        detail: "Tweet bot running".to_string(),
        post_id: None,
    })
}

async fn global_market_update(State(state): State<AppState>) -> (StatusCode, Json<TriggerStatus>) {
    trigger(state, ReportKind::GlobalMarket).await
}

async fn mtf_insights_update(State(state): State<AppState>) -> (StatusCode, Json<TriggerStatus>) {
    trigger(state, ReportKind::MtfInsights).await
}

async fn trigger(state: AppState, kind: ReportKind) -> (StatusCode, Json<TriggerStatus>) {
    let Ok(_guard) = state.running.for_kind(kind).try_lock() else {
        warn!("⏳ {} refused: the previous run is still going", kind.title());
        return (
            StatusCode::CONFLICT,
            Json(TriggerStatus::failed(format!(
                "{} is already running",
                kind.title()
            ))),
        );
    };

    let status = state.pipeline.run(kind).await;
    let code = if status.ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (code, Json(status))
}
