//! Violation reporting for dsakit
//!
//! Every contract violation flows through [`report`], which stamps the error
//! with its source location and time, logs it, forwards it to the installed
//! process-wide sink and hands the error back to the caller. Reporting never
//! terminates the process; the failing operation returns `Err` instead.
//!
//! ```rust
//! use dsakit::error_report::{self, ViolationReport};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = seen.clone();
//! error_report::set_violation_sink(Box::new(move |_report: &ViolationReport| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! let stack = dsakit::LinkedStack::<i32>::new();
//! assert!(stack.peek().is_err());
//! assert!(seen.load(Ordering::SeqCst) >= 1);
//! error_report::clear_violation_sink();
//! ```

use crate::error::DsaError;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// A single recorded contract violation
#[derive(Debug, Clone)]
pub struct ViolationReport {
    /// Error category, see [`DsaError::category`]
    pub kind: &'static str,
    /// Rendered error message
    pub message: String,
    /// Source file of the detecting call site
    pub file: &'static str,
    /// Source line of the detecting call site
    pub line: u32,
    /// Wall-clock time the violation was recorded
    pub timestamp: SystemTime,
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self
            .timestamp
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        write!(
            f,
            "| {} | {} {} | {}: {}",
            secs, self.file, self.line, self.kind, self.message
        )
    }
}

/// Callback receiving every violation report
pub type ViolationSink = Box<dyn Fn(&ViolationReport) + Send + Sync>;

type SharedSink = Arc<dyn Fn(&ViolationReport) + Send + Sync>;

static SINK: Lazy<RwLock<Option<SharedSink>>> = Lazy::new(|| RwLock::new(None));

/// Install a process-wide sink, replacing any previous one
///
/// The sink runs without the registry lock held, so it may itself install
/// or clear sinks and may trigger further violations.
pub fn set_violation_sink(sink: ViolationSink) {
    *SINK.write() = Some(Arc::from(sink));
}

/// Remove the installed sink; reports are then only logged
pub fn clear_violation_sink() {
    *SINK.write() = None;
}

/// Record a violation detected at `file:line` and return the error unchanged
pub fn report(err: DsaError, file: &'static str, line: u32) -> DsaError {
    let report = ViolationReport {
        kind: err.category(),
        message: err.to_string(),
        file,
        line,
        timestamp: SystemTime::now(),
    };
    log::warn!("{}", report);
    let sink = SINK.read().clone();
    if let Some(sink) = sink {
        sink(&report);
    }
    err
}

/// Report a violation at the current source location and evaluate to the error
///
/// Used as `return Err(dsa_violation!(DsaError::out_of_range(i, n)));`
#[macro_export]
macro_rules! dsa_violation {
    ($err:expr) => {
        $crate::error_report::report($err, file!(), line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    // tests installing a sink share the process-wide slot
    static SINK_TESTS: Mutex<()> = Mutex::new(());

    #[test]
    fn test_report_returns_same_error() {
        let err = report(DsaError::out_of_range(4, 2), "lib.rs", 7);
        assert!(matches!(err, DsaError::OutOfRange { index: 4, size: 2 }));
    }

    #[test]
    fn test_macro_captures_location() {
        let _guard = SINK_TESTS.lock();
        let line = Arc::new(AtomicU32::new(0));
        let seen = line.clone();
        set_violation_sink(Box::new(move |r: &ViolationReport| {
            if r.file.ends_with("error_report.rs") && r.kind == "key" {
                seen.store(r.line, Ordering::SeqCst);
            }
        }));
        let expected = line!() + 1;
        let err = dsa_violation!(DsaError::key_not_found(b"k"));
        clear_violation_sink();

        assert_eq!(err.category(), "key");
        assert_eq!(line.load(Ordering::SeqCst), expected);
    }

    #[test]
    fn test_sink_may_reenter_registry() {
        let _guard = SINK_TESTS.lock();
        let nested_seen = Arc::new(AtomicBool::new(false));
        let flag = nested_seen.clone();
        set_violation_sink(Box::new(move |r: &ViolationReport| {
            if r.file == "outer.rs" {
                // a nested violation and a sink swap from inside the callback
                report(DsaError::empty_container("stack", "pop"), "nested.rs", 2);
                clear_violation_sink();
            } else if r.file == "nested.rs" {
                flag.store(true, Ordering::SeqCst);
            }
        }));

        let err = report(DsaError::out_of_range(1, 0), "outer.rs", 1);
        assert!(matches!(err, DsaError::OutOfRange { index: 1, size: 0 }));
        assert!(nested_seen.load(Ordering::SeqCst));
        clear_violation_sink();
    }

    #[test]
    fn test_report_display() {
        let report = ViolationReport {
            kind: "range",
            message: "Out of range: index 3, size 1".to_string(),
            file: "array.rs",
            line: 12,
            timestamp: SystemTime::UNIX_EPOCH,
        };
        let text = report.to_string();
        assert!(text.contains("array.rs 12"));
        assert!(text.contains("range"));
    }
}
