//! Thread-local context tracking for report generation.
//!
//! Records which phase of report generation the current thread is in and
//! which report section it is building, so log lines and diagnostics can say
//! where a data-quality event happened. Each report request runs on one
//! thread, so thread-local storage needs no coordination between requests.

use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<ReportContextSnapshot> = const { RefCell::new(ReportContextSnapshot::new()) };
}

/// Snapshot of what the current thread is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContextSnapshot {
    pub phase: Option<ReportPhase>,
    pub section: Option<String>,
}

impl ReportContextSnapshot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            section: None,
        }
    }
}

/// Major stages of report generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPhase {
    /// Reading the input document and config
    Loading,
    /// Adapting raw records into entity records
    Normalizing,
    /// Deriving metrics, tiers and buckets
    Classifying,
    /// Writing the output document
    Rendering,
}

impl std::fmt::Display for ReportPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Normalizing => write!(f, "normalizing"),
            Self::Classifying => write!(f, "classifying"),
            Self::Rendering => write!(f, "rendering"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: ReportContextSnapshot,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current report phase.
///
/// Returns a guard that restores the previous phase on drop.
#[must_use]
pub fn set_phase(phase: ReportPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the report section currently being built.
#[must_use]
pub fn set_section(title: impl Into<String>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().section = Some(title.into());
        ContextGuard { previous }
    })
}

#[must_use]
pub fn get_current_context() -> ReportContextSnapshot {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Short label for log prefixes, e.g. `classifying/Top 10 servicios`.
pub fn current_phase_label() -> String {
    let ctx = get_current_context();
    match (ctx.phase, ctx.section) {
        (Some(phase), Some(section)) => format!("{phase}/{section}"),
        (Some(phase), None) => phase.to_string(),
        (None, Some(section)) => section,
        (None, None) => "idle".to_string(),
    }
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = ReportContextSnapshot::new();
    });
}
