//! Resolution metrics.
//!
//! Counts which step of the fallback chain served each resolved field, so
//! a preview or admin report can show how much of a page is actually
//! translated. A metrics value is owned by its caller; resolution itself
//! keeps no state.

use crate::resolve::ResolutionSource;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for resolved fields, grouped by fallback step.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Served by a translation in the requested language
    requested: AtomicUsize,

    /// Served by a translation in the entity's default language
    default_language: AtomicUsize,

    /// Served by the entity's base field
    base: AtomicUsize,

    /// Nothing found
    empty: AtomicUsize,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolved field.
    pub fn record(&self, source: ResolutionSource) {
        let counter = match source {
            ResolutionSource::Requested => &self.requested,
            ResolutionSource::DefaultLanguage => &self.default_language,
            ResolutionSource::Base => &self.base,
            ResolutionSource::Empty => &self.empty,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requested = self.requested.load(Ordering::Relaxed);
        let default_language = self.default_language.load(Ordering::Relaxed);
        let base = self.base.load(Ordering::Relaxed);
        let empty = self.empty.load(Ordering::Relaxed);
        let total = requested + default_language + base + empty;

        let translated_rate = if total > 0 {
            (requested as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requested,
            default_language,
            base,
            empty,
            total,
            translated_rate,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.requested.store(0, Ordering::Relaxed);
        self.default_language.store(0, Ordering::Relaxed);
        self.base.store(0, Ordering::Relaxed);
        self.empty.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of resolution counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub requested: usize,
    pub default_language: usize,
    pub base: usize,
    pub empty: usize,
    pub total: usize,

    /// Share of fields served in the requested language, as a percentage (0-100)
    pub translated_rate: f64,
}

impl MetricsReport {
    /// Format the report as a human-readable string.
    pub fn format(&self) -> String {
        format!(
            "Resolved fields: {} total ({:.1}% in requested language)\n\
             - Requested language: {}\n\
             - Default language: {}\n\
             - Base value: {}\n\
             - Empty: {}",
            self.total,
            self.translated_rate,
            self.requested,
            self.default_language,
            self.base,
            self.empty,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let report = ResolutionMetrics::new().report();
        assert_eq!(report.total, 0);
        assert_eq!(report.translated_rate, 0.0);
    }

    #[test]
    fn test_record_each_source() {
        let metrics = ResolutionMetrics::new();
        metrics.record(ResolutionSource::Requested);
        metrics.record(ResolutionSource::Requested);
        metrics.record(ResolutionSource::DefaultLanguage);
        metrics.record(ResolutionSource::Base);
        metrics.record(ResolutionSource::Empty);

        let report = metrics.report();
        assert_eq!(report.requested, 2);
        assert_eq!(report.default_language, 1);
        assert_eq!(report.base, 1);
        assert_eq!(report.empty, 1);
        assert_eq!(report.total, 5);
        assert_eq!(report.translated_rate, 40.0);
    }

    #[test]
    fn test_reset() {
        let metrics = ResolutionMetrics::new();
        metrics.record(ResolutionSource::Base);
        metrics.reset();
        assert_eq!(metrics.report().total, 0);
    }

    #[test]
    fn test_report_format() {
        let metrics = ResolutionMetrics::new();
        metrics.record(ResolutionSource::Requested);
        metrics.record(ResolutionSource::Base);

        let formatted = metrics.report().format();
        assert!(formatted.contains("2 total"));
        assert!(formatted.contains("50.0%"));
        assert!(formatted.contains("Base value: 1"));
    }

    #[test]
    fn test_report_serializes() {
        let metrics = ResolutionMetrics::new();
        metrics.record(ResolutionSource::Empty);
        let json = serde_json::to_value(metrics.report()).expect("serialize");
        assert_eq!(json["empty"], 1);
        assert_eq!(json["total"], 1);
    }
}
