// src/views/results.rs
use crate::state::ViewState;
use crate::types::{format_agent_name, Agent, SearchResult};

/// What the results panel shows, in priority order.
#[derive(Debug, PartialEq)]
pub enum ResultsView<'a> {
    Searching,
    NotReady,
    Idle,
    Found(&'a SearchResult),
}

pub fn results_view(state: &ViewState) -> ResultsView<'_> {
    if state.searching() {
        ResultsView::Searching
    } else if !state.database_ready() {
        ResultsView::NotReady
    } else {
        match &state.search_result {
            Some(result) => ResultsView::Found(result),
            None => ResultsView::Idle,
        }
    }
}

pub fn match_label(count: usize) -> String {
    if count == 1 {
        "1 match".to_string()
    } else {
        format!("{} matches", count)
    }
}

pub fn render_results(state: &ViewState) -> String {
    match results_view(state) {
        ResultsView::Searching => {
            "AI agents processing your query...\nAnalyzing resumes with AI".to_string()
        }
        ResultsView::NotReady => "Upload resumes to get started\n\
             Our AI agents will analyze and index them for intelligent searching"
            .to_string(),
        ResultsView::Idle => "Start searching to find matching candidates\n\
             Our AI agents will analyze resumes for the best matches"
            .to_string(),
        ResultsView::Found(result) => render_found(result),
    }
}

fn render_found(result: &SearchResult) -> String {
    let agent_name = format_agent_name(&result.agent_used);
    let tone = Agent::from_id(&result.agent_used).tone();
    let count = result.match_count();

    let mut lines = vec![
        format!(
            "AI Analysis Results  [{}]  [{} | {}]",
            match_label(count),
            agent_name,
            tone.as_str()
        ),
        format!("Analyzed by {}", agent_name),
        result.answer.clone(),
        String::new(),
    ];

    if count == 0 {
        lines.push("No matching candidates found for this query".to_string());
        lines.push("Try refining your search criteria".to_string());
    } else {
        lines.push(format!("Matching Candidates ({})", count));
        for (i, preview) in result.previews().iter().enumerate() {
            lines.push(format!(
                "  {}. {}  ✓ Matched Candidate  {}",
                i + 1,
                preview.name,
                preview.resume_url
            ));
        }
    }

    lines.join("\n")
}
