use crate::state::ViewState;
use crate::types::Agent;

/// Agent selected by the last search, general analyzer before any search
pub fn current_agent(state: &ViewState) -> Agent {
    state
        .search_result
        .as_ref()
        .map(|result| Agent::from_id(&result.agent_used))
        .unwrap_or(Agent::GeneralAnalyzer)
}

pub fn render_agent_status(state: &ViewState) -> String {
    let agent = current_agent(state);
    let mut lines = vec!["AI Agent System - Multi-agent recruitment analysis".to_string()];

    if state.searching() {
        lines.push("Processing...".to_string());
    }

    let readiness = if state.database_ready() { "ready" } else { "empty" };
    lines.push(format!(
        "Database: {} ({} resumes, {} chunks)",
        readiness,
        state.resume_count(),
        state.database_status.chunks
    ));
    lines.push(format!("Active agent: {} - {}", agent.name(), agent.description()));

    lines.join("\n")
}
