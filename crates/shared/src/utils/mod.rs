mod logs;
mod metrics;
mod otel;
mod random_string;
mod secret;
mod shutdown;
mod slug;
mod template;
mod tracer;

pub use self::logs::{LogSettings, init_logger};
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::otel::{Telemetry, TracingContext};
pub use self::random_string::{generate_order_number, generate_random_string};
pub use self::secret::constant_time_eq;
pub use self::shutdown::shutdown_signal;
pub use self::slug::{resolve_slug, slugify};
pub use self::template::{EmailTemplate, EmailTemplateData, RenderedEmail, render_email};
pub use self::tracer::ServiceTracer;
