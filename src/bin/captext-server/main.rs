use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info, warn};

mod metrics;

use captext::video_id::resolve_video_id;
use captext::{ApiConfig, Error, FetchOpts, Fetcher, Outcome, TranscriptApiClient};
use metrics::Origin::{Remote, Vtt};

#[derive(Parser, Debug)]
#[command(name = "captext-server")]
#[command(about = "HTTP server for caption transcript extraction")]
struct Params {
    /// Host interface to bind to.
    #[arg(long = "host", default_value = "127.0.0.1")]
    host: String,

    /// TCP port to listen on.
    #[arg(long = "port", default_value_t = 8080)]
    port: u16,

    /// Maximum request body size (bytes).
    #[arg(long = "max-bytes", default_value_t = 10 * 1024 * 1024)]
    max_bytes: usize,
}

#[derive(Clone)]
struct AppState {
    /// `None` when `TRANSCRIPT_API_KEY` is not configured; remote fetches are then refused.
    fetcher: Option<Arc<Fetcher<TranscriptApiClient>>>,
}

#[derive(Debug, Deserialize)]
struct TranscriptQuery {
    video: String,
    #[serde(default, alias = "languages")]
    lang: Option<String>,
    #[serde(default)]
    min_chars: Option<usize>,
}

#[tokio::main]
async fn main() {
    captext::init_logging();

    if let Err(err) = run().await {
        error!(error = ?err, "captext-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let params = Params::parse();

    if let Err(err) = metrics::init() {
        warn!(error = %err, "metrics disabled");
    }

    let addr: SocketAddr = format!("{}:{}", params.host, params.port)
        .parse()
        .context("invalid host/port bind address")?;

    let fetcher = match remote_fetcher().await {
        Ok(fetcher) => Some(Arc::new(fetcher)),
        Err(err) => {
            warn!(error = %err, "remote transcripts disabled");
            None
        }
    };

    let app = router(AppState { fetcher }, params.max_bytes);

    let listener = TcpListener::bind(addr).await.context("bind failed")?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Build the shared remote fetcher from the environment.
///
/// The HTTP client is blocking and must not be created on an async worker.
async fn remote_fetcher() -> Result<Fetcher<TranscriptApiClient>> {
    let config = ApiConfig::from_env()?;
    let client = tokio::task::spawn_blocking(move || TranscriptApiClient::new(config))
        .await
        .context("client setup task failed")??;
    Ok(Fetcher::new(client))
}

fn router(state: AppState, max_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/v1/vtt", post(normalize_vtt))
        .route("/v1/transcript", get(fetch_transcript))
        .route_layer(from_fn(metrics::track_http_metrics))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn root() -> &'static str {
    "captext-server: POST /v1/vtt (body: WebVTT text), GET /v1/transcript?video=<id|url>"
}

async fn healthz() -> &'static str {
    "ok"
}

async fn normalize_vtt(body: Bytes) -> Response {
    let (status, outcome) =
        match tokio::task::spawn_blocking(move || captext::normalize_bytes(&body)).await {
            Ok(Ok(transcript)) => (StatusCode::OK, Outcome::success(transcript)),
            // Undecodable input is the caller's fault.
            Ok(Err(err)) => (StatusCode::BAD_REQUEST, Outcome::from(Err::<String, _>(err))),
            Err(err) => {
                error!(error = %err, "normalizer task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Outcome::failure("normalizer task failed"),
                )
            }
        };

    metrics::record_transcript(Vtt, outcome.is_success());
    respond(status, outcome)
}

async fn fetch_transcript(
    State(state): State<AppState>,
    query: Result<Query<TranscriptQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            metrics::record_transcript(Remote, false);
            return respond(
                StatusCode::BAD_REQUEST,
                Outcome::failure(rejection.body_text()),
            );
        }
    };

    if resolve_video_id(&query.video).is_none() {
        let outcome: Outcome = Err::<String, _>(Error::InvalidVideo(query.video)).into();
        metrics::record_transcript(Remote, false);
        return respond(StatusCode::BAD_REQUEST, outcome);
    }

    let Some(fetcher) = state.fetcher else {
        metrics::record_transcript(Remote, false);
        return respond(
            StatusCode::SERVICE_UNAVAILABLE,
            Outcome::failure("remote transcripts are not configured on this server"),
        );
    };

    let opts = FetchOpts {
        languages: parse_languages(query.lang.as_deref()),
        min_transcript_chars: query.min_chars.unwrap_or(0),
    };

    // The HTTP client is blocking; keep requests off the async workers.
    let video = query.video;
    let res = tokio::task::spawn_blocking(move || fetcher.fetch(&video, &opts)).await;

    let outcome = match res {
        Ok(res) => Outcome::from(res),
        Err(err) => {
            error!(error = %err, "fetch task failed");
            Outcome::failure("fetch task failed")
        }
    };

    metrics::record_transcript(Remote, outcome.is_success());
    respond(outcome_status(&outcome, StatusCode::BAD_GATEWAY), outcome)
}

fn outcome_status(outcome: &Outcome, failure: StatusCode) -> StatusCode {
    if outcome.is_success() {
        StatusCode::OK
    } else {
        failure
    }
}

fn respond(status: StatusCode, outcome: Outcome) -> Response {
    (status, Json(outcome)).into_response()
}

/// Split a `lang=de,en` query value into an ordered preference list, defaulting to English.
fn parse_languages(raw: Option<&str>) -> Vec<String> {
    let langs: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect();

    if langs.is_empty() {
        FetchOpts::default().languages
    } else {
        langs
    }
}
