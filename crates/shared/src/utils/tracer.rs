use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

use crate::utils::{Method, Metrics, Status, TracingContext};

/// Per-service span and request metrics.
#[derive(Clone)]
pub struct ServiceTracer {
    name: &'static str,
    metrics: Arc<Mutex<Metrics>>,
}

impl ServiceTracer {
    /// Registers `<name>_request_counter` and `<name>_request_duration`.
    pub async fn new(name: &'static str, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();

        let mut registry = registry.lock().await;
        registry.register(
            format!("{name}_request_counter"),
            format!("Total number of requests to the {name}"),
            metrics.request_counter.clone(),
        );
        registry.register(
            format!("{name}_request_duration"),
            format!("Histogram of request durations for the {name}"),
            metrics.request_duration.clone(),
        );

        Self {
            name,
            metrics: Arc::new(Mutex::new(metrics)),
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer(self.name)
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub async fn success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, true, message).await;
    }

    pub async fn failure(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, false, message).await;
    }

    /// Closes the span from a result: `Ok` records `success_message`, `Err`
    /// records the error text.
    pub async fn record<T, E>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, E>,
        success_message: &str,
    ) -> Result<T, E>
    where
        E: std::fmt::Display,
    {
        let failure = result.as_ref().err().map(|e| e.to_string());

        match failure {
            None => self.success(tracing_ctx, method, success_message).await,
            Some(message) => self.failure(tracing_ctx, method, &message).await,
        }
        result
    }

    async fn complete(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let (status_str, status) = if is_success {
            ("SUCCESS", Status::Success)
        } else {
            ("ERROR", Status::Error)
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
