use crate::timers::Schedule;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quiet;

/// What the list should do once typing has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// The query is blank: leave search mode and drop the type filters.
    Clear,
    Query(String),
}

/// Delays search requests until the input has been quiet for `delay`.
/// Every keystroke replaces the pending request.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    input: String,
    schedule: Schedule<Quiet>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            input: String::new(),
            schedule: Schedule::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Record the current contents of the search box.
    pub fn on_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.schedule.schedule(Quiet, self.delay);
        trace!(input = text, "search input changed");
    }

    pub fn is_pending(&self) -> bool {
        self.schedule.is_pending(Quiet)
    }

    pub fn cancel(&mut self) {
        self.schedule.cancel(Quiet);
    }

    /// Let `elapsed` pass and return the request that became due, if any.
    pub fn advance(&mut self, elapsed: Duration) -> Option<SearchRequest> {
        let until = self.schedule.now() + elapsed;
        let fired = self.schedule.pop_due(until).is_some();
        self.schedule.settle(until);
        if !fired {
            return None;
        }
        if self.input.trim().is_empty() {
            Some(SearchRequest::Clear)
        } else {
            Some(SearchRequest::Query(self.input.clone()))
        }
    }
}
