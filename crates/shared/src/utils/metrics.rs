use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge, histogram::Histogram};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    sync::{Arc, atomic::AtomicU64},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use sysinfo::{Pid, ProcessesToUpdate, System};

const SAMPLE_INTERVAL: Duration = Duration::from_secs(15);

const LATENCY_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Process gauges sampled by [`run_metrics_collector`].
#[derive(Debug, Clone, Default)]
pub struct SystemMetrics {
    pub resident_memory_bytes: Gauge,
    pub virtual_memory_bytes: Gauge,
    pub host_available_memory_bytes: Gauge,
    pub host_cpu_usage_percent: Gauge<f64, AtomicU64>,
    pub threads: Gauge,
    pub start_time_seconds: Gauge,
}

impl SystemMetrics {
    pub fn new() -> Self {
        let metrics = Self::default();
        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        metrics.start_time_seconds.set(started);
        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        let process = registry.sub_registry_with_prefix("process");
        process.register(
            "resident_memory_bytes",
            "Resident memory of the server process",
            self.resident_memory_bytes.clone(),
        );
        process.register(
            "virtual_memory_bytes",
            "Virtual memory of the server process",
            self.virtual_memory_bytes.clone(),
        );
        process.register(
            "threads",
            "OS threads owned by the server process",
            self.threads.clone(),
        );
        process.register(
            "start_time_seconds",
            "Process start time since unix epoch",
            self.start_time_seconds.clone(),
        );

        let host = registry.sub_registry_with_prefix("host");
        host.register(
            "available_memory_bytes",
            "Memory available to new processes",
            self.host_available_memory_bytes.clone(),
        );
        host.register(
            "cpu_usage_percent",
            "Global CPU usage across all cores",
            self.host_cpu_usage_percent.clone(),
        );
    }

    /// Refreshes the gauges from `sys`. CPU usage needs two samples, so the
    /// first reading after startup is zero.
    pub fn sample(&self, sys: &mut System, pid: Pid) {
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        self.host_available_memory_bytes
            .set(sys.available_memory() as i64);
        self.host_cpu_usage_percent
            .set(f64::from(sys.global_cpu_usage()));

        if let Some(process) = sys.process(pid) {
            self.resident_memory_bytes.set(process.memory() as i64);
            self.virtual_memory_bytes
                .set(process.virtual_memory() as i64);
        }

        if let Some(threads) = thread_count(pid) {
            self.threads.set(threads);
        }
    }
}

// Linux only; other platforms leave the gauge at zero.
fn thread_count(pid: Pid) -> Option<i64> {
    let status = std::fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
    status
        .lines()
        .find_map(|line| line.strip_prefix("Threads:"))
        .and_then(|count| count.trim().parse().ok())
}

pub async fn run_metrics_collector(metrics: Arc<SystemMetrics>) {
    let Ok(pid) = sysinfo::get_current_pid() else {
        tracing::warn!("⚠️ Process metrics disabled: cannot resolve own pid");
        return;
    };

    let mut sys = System::new();
    let mut interval = tokio::time::interval(SAMPLE_INTERVAL);
    loop {
        interval.tick().await;
        metrics.sample(&mut sys, pid);
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

/// Request counter and latency histogram for one service.
#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(LATENCY_BUCKETS.into_iter())
            }),
        }
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn record_counts_by_label() {
        let metrics = Metrics::new();
        metrics.record(Method::Post, Status::Success, 0.02);
        metrics.record(Method::Post, Status::Success, 0.03);
        metrics.record(Method::Post, Status::Error, 0.01);

        let ok = Labels {
            method: Method::Post,
            status: Status::Success,
        };
        assert_eq!(metrics.request_counter.get_or_create(&ok).get(), 2);
    }

    #[test]
    fn process_gauges_are_prefixed() {
        let metrics = SystemMetrics::new();
        let mut registry = Registry::default();
        metrics.register(&mut registry);

        let mut out = String::new();
        encode(&mut out, &registry).unwrap();

        assert!(out.contains("process_resident_memory_bytes"));
        assert!(out.contains("host_cpu_usage_percent"));
        assert!(metrics.start_time_seconds.get() > 0);
    }
}
