// src/views/mod.rs
//! Text renderers over the view state. None of them mutate it.

pub mod agent;
pub mod gallery;
pub mod header;
pub mod job_description;
pub mod preview;
pub mod results;
pub mod search;
pub mod upload;

pub use gallery::{filter_resumes, GalleryView, ResumeGallery};
pub use results::{results_view, ResultsView};
pub use search::{SearchBox, QUICK_SEARCHES};
pub use upload::UploadPanel;

use crate::state::{Page, ViewState};

/// Full screen for the current page
pub fn render_page(
    state: &ViewState,
    upload: &UploadPanel,
    search: &SearchBox,
    gallery: &ResumeGallery,
) -> String {
    let mut sections = vec![header::render_header(state)];

    match state.page {
        Page::Home => {
            sections.push(agent::render_agent_status(state));
            sections.push(upload.render(state));
            sections.push(job_description::render_job_description(
                &state.job_description,
            ));
            sections.push(search.render(state));
            sections.push(results::render_results(state));
        }
        Page::Resumes => {
            sections.push(gallery.render(&state.uploaded_resumes));
        }
    }

    if let Some(modal) = preview::render_preview(state) {
        sections.push(modal);
    }

    sections.join("\n\n")
}
