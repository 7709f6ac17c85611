//! Parallel normalization of many files.
//!
//! Files share nothing but the read-only role vocabulary, so each one is
//! normalized on whichever rayon worker picks it up.

use rayon::prelude::*;

use crate::base::FileId;
use crate::uast::{FileNormalization, NormalizerConfig, normalize_source};

/// Normalize `files` in parallel. Results come back in input order.
pub fn normalize_files(
    files: &[(FileId, &str)],
    config: &NormalizerConfig,
) -> Vec<(FileId, FileNormalization)> {
    let results: Vec<_> = files
        .par_iter()
        .map(|&(file, text)| (file, normalize_source(text, config)))
        .collect();

    let failed = results
        .iter()
        .map(|(_, r)| r.failures().count())
        .sum::<usize>();
    tracing::debug!(
        "[BATCH] normalized {} files, {} declarations skipped",
        results.len(),
        failed
    );
    results
}
