//! Normalizer configuration.

/// Options for one normalization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Re-check span containment over every finished declaration
    pub verify_spans: bool,
    /// Normalize statements inside method, constructor and initializer
    /// bodies. When off, bodies become empty `Block` nodes.
    pub normalize_bodies: bool,
    /// Report constants whose body leaves an abstract member unimplemented
    pub report_missing_implementations: bool,
    /// Maximum nesting of declarations, statements and expressions
    pub max_depth: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            verify_spans: true,
            normalize_bodies: true,
            report_missing_implementations: true,
            max_depth: 64,
        }
    }
}

impl NormalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verify_spans(mut self, verify_spans: bool) -> Self {
        self.verify_spans = verify_spans;
        self
    }

    pub fn with_normalize_bodies(mut self, normalize_bodies: bool) -> Self {
        self.normalize_bodies = normalize_bodies;
        self
    }

    pub fn with_report_missing_implementations(mut self, report: bool) -> Self {
        self.report_missing_implementations = report;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
