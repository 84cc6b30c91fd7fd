//! Prometheus-backed implementation of the resource metrics port.
//!
//! Compiled only with the `metrics` feature.

mod prometheus_resources;

pub use prometheus_resources::PrometheusResourceMetrics;
