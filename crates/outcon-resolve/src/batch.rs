//! Concurrent resolution of many candidates
//!
//! Workers share the catalog read-only and pull candidates from a shared
//! cursor. A failing candidate is recorded and skipped; it does not stop the
//! other workers or affect later candidates.

use log::{info, warn};
use outcon_catalog::OperationCatalog;
use outcon_diagnostics::Diagnostic;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Expression, ResolutionPass, ResolvedTree, TreeResolutionError};

/// Settings for batch resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Number of worker threads
    pub workers: usize,
    /// Check each argument against the operation's declared parameter
    pub check_arguments: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            check_arguments: true,
        }
    }
}

/// A candidate that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    /// Position of the candidate in the submitted batch
    pub candidate: usize,
    pub error: TreeResolutionError,
}

impl CandidateFailure {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = self.error.to_diagnostic();
        let subject = match &diag.subject {
            Some(operation) => format!("candidate #{} ({})", self.candidate, operation),
            None => format!("candidate #{}", self.candidate),
        };
        diag.with_subject(subject)
    }
}

/// Outcome of resolving a batch, ordered by candidate position
#[derive(Debug, Default)]
pub struct BatchReport {
    pub resolved: Vec<(usize, ResolvedTree)>,
    pub failures: Vec<CandidateFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.resolved.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.failures.iter().map(CandidateFailure::to_diagnostic).collect()
    }
}

/// Resolve every candidate, spreading the work over `config.workers` threads
pub fn resolve_batch(
    catalog: &OperationCatalog,
    candidates: &[Expression],
    config: &ResolveConfig,
) -> BatchReport {
    let pass = ResolutionPass::new(catalog).with_argument_checks(config.check_arguments);
    let workers = config.workers.clamp(1, candidates.len().max(1));
    let cursor = AtomicUsize::new(0);
    let report = Mutex::new(BatchReport::default());

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    let candidate = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(expr) = candidates.get(candidate) else {
                        break;
                    };
                    match pass.resolve(expr) {
                        Ok(tree) => report.lock().resolved.push((candidate, tree)),
                        Err(error) => {
                            warn!("Candidate #{} aborted: {}", candidate, error);
                            report.lock().failures.push(CandidateFailure { candidate, error });
                        }
                    }
                }
            });
        }
    });

    let mut report = report.into_inner();
    report.resolved.sort_by_key(|(candidate, _)| *candidate);
    report.failures.sort_by_key(|failure| failure.candidate);
    info!(
        "Resolved {} of {} candidates on {} worker(s), {} failed",
        report.resolved.len(),
        candidates.len(),
        workers,
        report.failures.len()
    );
    report
}
