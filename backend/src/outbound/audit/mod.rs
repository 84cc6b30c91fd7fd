//! Audit sink adapters.

mod tracing_audit_recorder;

pub use tracing_audit_recorder::{AUDIT_TARGET, TracingAuditRecorder};
