//! Non-fatal findings collected during an extraction
//!
//! Readers push typed records into a [`Diagnostics`] sink owned by the
//! extraction call. Each warning class has its own counter against a shared
//! cap; the first record past the cap becomes a single suppression notice
//! and later ones are dropped. Recorded warnings are also logged through
//! `tracing` as they arrive.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Default maximum number of warnings recorded per class.
pub const DEFAULT_MAX_WARNINGS: usize = 25;

/// Class of a non-fatal finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A vertex component exceeds the magnitude bound.
    VertexMagnitude,
    /// A UV coordinate lies outside the configured bounds.
    UvOutOfBounds,
    /// A normal's length deviates from 1 beyond the tolerance.
    NonUnitNormal,
    /// The first triangle of a set is not (0,1,2).
    UnexpectedFirstTriangle,
    /// A set's highest referenced index is below its last vertex.
    UnusedTrailingVertex,
    /// UV data was inferred absent.
    UvAbsent,
    /// Texture width is not a power of two.
    NonPowerOfTwoWidth,
    /// Texture dimension above 4096 or below 1.
    DimensionOutOfRange,
    /// More mip maps than the dimensions allow.
    ExcessMipMaps,
}

impl DiagnosticKind {
    /// Get a human-readable description of this class
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VertexMagnitude => "vertex magnitude",
            Self::UvOutOfBounds => "UV bounds",
            Self::NonUnitNormal => "normal length",
            Self::UnexpectedFirstTriangle => "first triangle",
            Self::UnusedTrailingVertex => "unused vertex",
            Self::UvAbsent => "UV absent",
            Self::NonPowerOfTwoWidth => "texture width",
            Self::DimensionOutOfRange => "texture dimensions",
            Self::ExcessMipMaps => "mip map count",
        }
    }
}

/// Severity of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational note.
    Note,
    /// Sanity-check failure; extraction continued.
    Warning,
    /// Further warnings of this class are being dropped.
    Suppressed,
}

/// One recorded finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Note => write!(f, "NOTE: {}", self.message),
            Severity::Warning => write!(f, "WARN: {}", self.message),
            Severity::Suppressed => write!(f, "{}", self.message),
        }
    }
}

/// Ordered sink of diagnostics for one extraction call.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    max_warnings: usize,
    records: Vec<Diagnostic>,
    counts: BTreeMap<DiagnosticKind, usize>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WARNINGS)
    }
}

impl Diagnostics {
    /// Create an empty sink with the given per-class cap.
    #[must_use]
    pub fn new(max_warnings: usize) -> Self {
        Self {
            max_warnings,
            records: Vec::new(),
            counts: BTreeMap::new(),
        }
    }

    /// Record a warning, honoring the per-class cap.
    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(kind, Severity::Warning, message.into());
    }

    /// Record a note. Notes count against the cap like warnings.
    pub fn note(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(kind, Severity::Note, message.into());
    }

    fn push(&mut self, kind: DiagnosticKind, severity: Severity, message: String) {
        let count = self.counts.entry(kind).or_insert(0);
        *count += 1;

        if *count <= self.max_warnings {
            match severity {
                Severity::Note => tracing::info!("{message}"),
                _ => tracing::warn!("{message}"),
            }
            self.records.push(Diagnostic {
                kind,
                severity,
                message,
            });
        } else if *count == self.max_warnings + 1 {
            let message = format!("Additional {} warnings suppressed", kind.as_str());
            tracing::warn!("{message}");
            self.records.push(Diagnostic {
                kind,
                severity: Severity::Suppressed,
                message,
            });
        }
    }

    /// All recorded diagnostics, in emission order.
    #[must_use]
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Number of findings of `kind`, including suppressed ones.
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the sink, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Diagnostic> {
        self.records
    }
}
