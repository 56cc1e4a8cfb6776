use std::time::Instant;

use rulesmith::generate::ModelClient;
use rulesmith::{Copilot, RuleHistory};

/// Shared state for all HTTP handlers.
///
/// The model client is boxed so the composition root in `main` decides the
/// transport; handlers only see the copilot.
pub struct AppState {
    pub copilot: Copilot<Box<dyn ModelClient>>,
    /// Process start, for uptime reporting.
    pub started: Instant,
}

impl AppState {
    pub fn new(copilot: Copilot<Box<dyn ModelClient>>) -> Self {
        Self {
            copilot,
            started: Instant::now(),
        }
    }

    /// The history behind the copilot.
    pub fn history(&self) -> &RuleHistory {
        self.copilot.history()
    }
}
