// crates/exitsim-core/src/diagnostics.rs
// ============================================================================
// Module: Run Diagnostics
// Description: Structured diagnostic events and sinks for simulated runs.
// Purpose: Emit JSON-line warnings and run records without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Warnings and run records are modeled as [`DiagnosticEvent`] values and
//! handed to a [`DiagnosticSink`]. Sinks serialize events as JSON lines so a
//! harness can route them to any logging pipeline. Emitting a diagnostic never
//! changes the outcome or the exit status of a run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Kind of diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A run began with its effective configuration.
    RunStarted,
    /// The behaviour distribution did not sum close to 100%.
    NormalizationWarning,
    /// A single behaviour entry moved by more than the per-entry tolerance.
    EntryAdjustedWarning,
    /// An input value could not be converted to a number and was dropped.
    ConversionWarning,
    /// An outcome was drawn from the partition.
    OutcomeSampled,
    /// A run failed after configuration resolved.
    RunFailed,
}

/// Severity attached to a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational record.
    Info,
    /// Recoverable anomaly; the run continues.
    Warning,
    /// The run failed.
    Error,
}

/// Structured diagnostic payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticEvent {
    /// Event kind.
    pub event: DiagnosticKind,
    /// Event severity.
    pub severity: Severity,
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: u128,
    /// Human-readable message.
    pub message: String,
    /// Additional structured fields.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

impl DiagnosticEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(event: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            severity,
            timestamp_ms,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Creates a warning event.
    #[must_use]
    pub fn warning(event: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(event, Severity::Warning, message)
    }

    /// Attaches a structured field.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    /// Records a diagnostic event.
    fn record(&self, event: &DiagnosticEvent);
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink that logs JSON lines to stderr.
pub struct StderrDiagnosticSink;

impl DiagnosticSink for StderrDiagnosticSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileDiagnosticSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileDiagnosticSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DiagnosticSink for FileDiagnosticSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct RecordingDiagnosticSink {
    /// Recorded events in emission order.
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnosticSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the recorded events of one kind.
    #[must_use]
    pub fn events_of(&self, kind: DiagnosticKind) -> Vec<DiagnosticEvent> {
        self.events().into_iter().filter(|event| event.event == kind).collect()
    }
}

impl DiagnosticSink for RecordingDiagnosticSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
