//! Process metrics in Prometheus text format
//!
//! Each `ProcessMetrics` owns its own Prometheus recorder; nothing is
//! installed globally, so every router (and every test) counts separately.

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_gauge, gauge, Counter, Gauge, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct ProcessMetrics {
    started: Instant,
    handle: PrometheusHandle,
    requests: Counter,
    uptime: Gauge,
    rss: Gauge,
    virtual_memory: Gauge,
}

impl ProcessMetrics {
    pub fn new(version: &str, environment: &str) -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        let (requests, uptime, rss, virtual_memory) = metrics::with_local_recorder(&recorder, || {
            describe_counter!("app_requests_total", "Total number of requests");
            describe_gauge!(
                "app_uptime_seconds",
                Unit::Seconds,
                "Application uptime in seconds"
            );
            describe_gauge!("app_info", "Application information");
            describe_gauge!("process_memory_bytes", Unit::Bytes, "Memory usage in bytes");

            gauge!(
                "app_info",
                "version" => version.to_string(),
                "environment" => environment.to_string()
            )
            .set(1.0);

            (
                counter!("app_requests_total"),
                gauge!("app_uptime_seconds"),
                gauge!("process_memory_bytes", "type" => "rss"),
                gauge!("process_memory_bytes", "type" => "virtual"),
            )
        });

        Self {
            started: Instant::now(),
            handle,
            requests,
            uptime,
            rss,
            virtual_memory,
        }
    }

    pub fn record_request(&self) {
        self.requests.increment(1);
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Exposition body for `/api/metrics`; gauges are sampled at scrape time.
    pub fn render(&self, memory: MemoryUsage) -> String {
        self.uptime.set(self.uptime().as_secs() as f64);
        self.rss.set(memory.rss_bytes as f64);
        self.virtual_memory.set(memory.virtual_bytes as f64);
        self.handle.render()
    }
}

/// Resident and virtual memory of this process. Zero where unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryUsage {
    pub rss_bytes: u64,
    pub virtual_bytes: u64,
}

impl MemoryUsage {
    pub fn current() -> Self {
        std::fs::read_to_string("/proc/self/status")
            .map(|status| Self::parse_status(&status))
            .unwrap_or_default()
    }

    /// Parse `VmRSS` / `VmSize` (kB) out of a `/proc/<pid>/status` dump
    pub fn parse_status(status: &str) -> Self {
        let mut usage = Self::default();
        for line in status.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let kb = value
                .split_whitespace()
                .next()
                .and_then(|n| n.parse::<u64>().ok())
                .unwrap_or(0);
            match key {
                "VmRSS" => usage.rss_bytes = kb * 1024,
                "VmSize" => usage.virtual_bytes = kb * 1024,
                _ => {}
            }
        }
        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_reports_counters() {
        let metrics = ProcessMetrics::new("0.1.0", "test");
        metrics.record_request();
        metrics.record_request();
        let memory = MemoryUsage {
            rss_bytes: 2048,
            virtual_bytes: 4096,
        };

        let body = metrics.render(memory);
        assert!(body.contains("# TYPE app_requests_total counter"));
        assert!(body.contains("app_requests_total 2\n"));
        assert!(body.contains("# TYPE app_uptime_seconds gauge"));
        assert!(body.contains("app_info{"));
        assert!(body.contains("version=\"0.1.0\""));
        assert!(body.contains("environment=\"test\""));
        assert!(body.contains("process_memory_bytes{type=\"rss\"} 2048"));
        assert!(body.contains("process_memory_bytes{type=\"virtual\"} 4096"));
    }

    #[test]
    fn test_recorders_are_independent() {
        let first = ProcessMetrics::new("0.1.0", "test");
        let second = ProcessMetrics::new("0.1.0", "test");
        first.record_request();

        assert!(first.render(MemoryUsage::default()).contains("app_requests_total 1\n"));
        assert!(second.render(MemoryUsage::default()).contains("app_requests_total 0\n"));
    }

    #[test]
    fn test_parse_proc_status() {
        let status = "Name:\tlistapro\nVmSize:\t  1000 kB\nVmRSS:\t   200 kB\nThreads:\t4\n";
        let usage = MemoryUsage::parse_status(status);
        assert_eq!(usage.rss_bytes, 200 * 1024);
        assert_eq!(usage.virtual_bytes, 1000 * 1024);
        assert_eq!(MemoryUsage::parse_status(""), MemoryUsage::default());
    }
}
