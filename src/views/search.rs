// src/views/search.rs
//! Search box: debounced free typing plus immediate quick searches

use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::state::ViewState;
use crate::utils::is_dispatchable_query;

pub const QUICK_SEARCHES: [&str; 5] = [
    "React developers with 5+ years experience",
    "Python machine learning engineers",
    "Senior full-stack developers",
    "JavaScript and Node.js experts",
    "DevOps engineers with AWS experience",
];

pub struct SearchBox {
    query: String,
    min_len: usize,
    debouncer: Debouncer<String>,
}

impl SearchBox {
    /// The receiver yields queries once typing has settled.
    pub fn new(debounce: Duration, min_len: usize) -> (Self, UnboundedReceiver<String>) {
        let (debouncer, dispatched) = Debouncer::new(debounce);
        let search_box = Self {
            query: String::new(),
            min_len,
            debouncer,
        };
        (search_box, dispatched)
    }

    pub fn from_config(config: &ClientConfig) -> (Self, UnboundedReceiver<String>) {
        Self::new(config.debounce, config.min_query_len)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Input is disabled while a search runs or before anything is indexed.
    pub fn is_enabled(state: &ViewState) -> bool {
        !state.searching() && state.database_ready()
    }

    /// Replace the query text. Returns true when a debounced dispatch was
    /// scheduled; short input leaves any earlier pending dispatch alone.
    pub fn type_query(&mut self, text: &str) -> bool {
        self.query = text.to_string();

        if is_dispatchable_query(text, self.min_len) {
            self.debouncer.call(self.query.clone());
            true
        } else {
            false
        }
    }

    /// Shortcut queries bypass the debounce and supersede pending input.
    pub fn quick_search(&mut self, index: usize) -> Option<String> {
        let query = QUICK_SEARCHES.get(index)?.to_string();
        self.debouncer.cancel();
        self.query = query.clone();
        Some(query)
    }

    pub fn has_pending_dispatch(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn render(&self, state: &ViewState) -> String {
        let mut lines = vec![format!(
            "AI-Powered Search  [{} resumes]",
            state.resume_count()
        )];

        if !state.database_ready() {
            lines.push("! Upload some resumes first to start searching!".to_string());
        }

        let marker = if Self::is_enabled(state) { ">" } else { "x" };
        if self.query.is_empty() {
            lines.push(format!(
                "{} Describe the ideal candidate (e.g., 'React developer with 3+ years experience')",
                marker
            ));
        } else {
            lines.push(format!("{} {}", marker, self.query));
        }

        if self.has_pending_dispatch() {
            lines.push("(waiting for you to stop typing...)".to_string());
        }

        if state.searching() {
            lines.push("AI agents analyzing resumes...".to_string());
        }

        lines.push("Quick searches:".to_string());
        for (i, quick) in QUICK_SEARCHES.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, quick));
        }

        lines.join("\n")
    }
}
