//! Tracing setup: env filter, pretty or JSON output on stderr and optional
//! OTLP trace export.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::io;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "ridecast";

/// Flushes pending spans when dropped
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Failed to flush traces: {e}");
            }
        }
    }
}

/// Build the filter: `RUST_LOG` wins over the configured level, `verbose`
/// forces debug output for this crate.
fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { config.level.as_str() };

    let filter = match std::env::var("RUST_LOG") {
        Ok(directive) if !verbose => EnvFilter::new(directive),
        _ => EnvFilter::new(level),
    };

    filter
        .add_directive(
            "hyper=warn"
                .parse()
                .unwrap_or_else(|_| tracing::Level::WARN.into()),
        )
        .add_directive(
            "reqwest=warn"
                .parse()
                .unwrap_or_else(|_| tracing::Level::WARN.into()),
        )
        .add_directive(
            "fjall=warn"
                .parse()
                .unwrap_or_else(|_| tracing::Level::WARN.into()),
        )
}

fn tracer_provider(endpoint: &str) -> Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()
        .with_context(|| format!("Failed to create OTLP exporter for {endpoint}"))?;

    Ok(SdkTracerProvider::builder()
        .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
        .with_batch_exporter(exporter)
        .build())
}

/// Install the global subscriber. Keep the guard alive until exit.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> Result<TelemetryGuard> {
    let filter = env_filter(config, verbose);

    let provider = config
        .otlp_endpoint
        .as_deref()
        .map(tracer_provider)
        .transpose()?;
    let otel_layer = provider.as_ref().map(|provider| {
        opentelemetry::global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME))
    });

    let registry = tracing_subscriber::registry().with(filter).with(otel_layer);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        _ => registry
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .try_init(),
    }
    .context("Failed to initialize tracing subscriber")?;

    Ok(TelemetryGuard { provider })
}
