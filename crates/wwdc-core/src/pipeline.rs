//! Sequential per-session processing: resolve, then download.
//!
//! Sessions run one at a time in the given order. A session whose listing page
//! is unavailable is reported and skipped; it never stops the others.

use crate::error::ResolveError;
use crate::orchestrator::{DownloadOrchestrator, DownloadOutcome};
use crate::policy::DownloadPolicy;
use crate::resolver::SessionResolver;

/// What happened to one session.
#[derive(Debug)]
pub enum SessionReport {
    Processed {
        session_id: String,
        /// Neither video nor PDF was found on the listing page.
        nothing_found: bool,
        outcomes: Vec<DownloadOutcome>,
    },
    Unavailable {
        session_id: String,
        error: ResolveError,
    },
}

impl SessionReport {
    pub fn session_id(&self) -> &str {
        match self {
            SessionReport::Processed { session_id, .. }
            | SessionReport::Unavailable { session_id, .. } => session_id,
        }
    }
}

/// Totals over a run, for the process exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sessions: usize,
    pub unavailable: usize,
    pub failed_assets: usize,
    pub empty_sessions: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &SessionReport) {
        self.sessions += 1;
        match report {
            SessionReport::Processed {
                nothing_found,
                outcomes,
                ..
            } => {
                self.failed_assets += outcomes.iter().filter(|o| o.status.is_failure()).count();
                if *nothing_found {
                    self.empty_sessions += 1;
                }
            }
            SessionReport::Unavailable { .. } => self.unavailable += 1,
        }
    }

    /// True when the run should exit non-zero. `strict` also fails on sessions with no assets.
    pub fn failed(&self, strict: bool) -> bool {
        self.unavailable > 0 || self.failed_assets > 0 || (strict && self.empty_sessions > 0)
    }
}

/// Resolves and downloads each of `session_ids` for `year`, calling
/// `on_report` as each session finishes.
pub fn process_sessions<F>(
    resolver: &SessionResolver<'_>,
    orchestrator: &DownloadOrchestrator<'_>,
    year: &str,
    session_ids: &[String],
    policy: &DownloadPolicy,
    mut on_report: F,
) -> RunSummary
where
    F: FnMut(&SessionReport),
{
    let mut summary = RunSummary::default();
    for session_id in session_ids {
        let report = match resolver.resolve(year, session_id, policy) {
            Ok(resolved) => {
                let nothing_found = resolved.is_empty();
                SessionReport::Processed {
                    session_id: session_id.clone(),
                    nothing_found,
                    outcomes: orchestrator.process(resolved, policy),
                }
            }
            Err(error) => {
                tracing::warn!(year, session_id = %session_id, "{}", error);
                SessionReport::Unavailable {
                    session_id: session_id.clone(),
                    error,
                }
            }
        };
        summary.record(&report);
        on_report(&report);
    }
    summary
}
