//! Prometheus metrics for captext-server.
//!
//! Metrics are opt-in: until [`init`] succeeds every recorder is a no-op and `/metrics` answers
//! 503, so a registration failure never takes the transcript endpoints down with it.

use std::sync::OnceLock;
use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{HeaderValue, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use prometheus::core::Collector;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

/// Routes hit by scrapers and health checks; tracking them would drown out real traffic.
const UNTRACKED_ROUTES: &[&str] = &["/metrics", "/healthz"];

struct ServerMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    in_flight: IntGauge,
    transcripts: IntCounterVec,
}

impl ServerMetrics {
    fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("captext".to_owned()), None)?;

        let requests = register(
            &registry,
            IntCounterVec::new(
                Opts::new("http_requests_total", "HTTP requests served, by status."),
                &["status"],
            )?,
        )?;
        let latency = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new("http_request_duration_seconds", "HTTP request latency."),
                &["status"],
            )?,
        )?;
        let in_flight = register(
            &registry,
            IntGauge::new("http_in_flight_requests", "HTTP requests currently being served.")?,
        )?;
        let transcripts = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "transcripts_total",
                    "Transcripts produced, by input path and outcome.",
                ),
                &["source", "outcome"],
            )?,
        )?;

        Ok(Self {
            registry,
            requests,
            latency,
            in_flight,
            transcripts,
        })
    }
}

fn register<C>(registry: &Registry, collector: C) -> prometheus::Result<C>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;
    Ok(collector)
}

static METRICS: OnceLock<ServerMetrics> = OnceLock::new();

/// Create and register the metric families. Safe to call more than once.
pub fn init() -> prometheus::Result<()> {
    if METRICS.get().is_none() {
        let _ = METRICS.set(ServerMetrics::new()?);
    }
    Ok(())
}

/// Where a transcript came from, for the `source` label.
#[derive(Debug, Clone, Copy)]
pub enum Origin {
    Vtt,
    Remote,
}

impl Origin {
    fn label(self) -> &'static str {
        match self {
            Self::Vtt => "vtt",
            Self::Remote => "remote",
        }
    }
}

pub fn record_transcript(origin: Origin, success: bool) {
    let Some(m) = METRICS.get() else { return };
    let outcome = if success { "success" } else { "failure" };
    m.transcripts
        .with_label_values(&[origin.label(), outcome])
        .inc();
}

pub async fn prometheus_metrics() -> Response {
    let Some(m) = METRICS.get() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "metrics disabled").into_response();
    };

    let mut buf = Vec::new();
    if let Err(err) = TextEncoder::new().encode(&m.registry.gather(), &mut buf) {
        tracing::error!(error = %err, "failed to encode metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to encode metrics").into_response();
    }

    let content_type = HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8");
    ([(header::CONTENT_TYPE, content_type)], buf).into_response()
}

/// Middleware counting requests per status, with latency and in-flight tracking.
pub async fn track_http_metrics(req: Request<Body>, next: Next) -> Response {
    let Some(m) = METRICS.get() else {
        return next.run(req).await;
    };

    let tracked = match req.extensions().get::<MatchedPath>() {
        Some(path) => !UNTRACKED_ROUTES.contains(&path.as_str()),
        None => !UNTRACKED_ROUTES.contains(&req.uri().path()),
    };
    if !tracked {
        return next.run(req).await;
    }

    let start = Instant::now();
    m.in_flight.inc();
    let response = next.run(req).await;
    m.in_flight.dec();

    let status = response.status().as_u16().to_string();
    m.requests.with_label_values(&[status.as_str()]).inc();
    m.latency
        .with_label_values(&[status.as_str()])
        .observe(start.elapsed().as_secs_f64());

    response
}
