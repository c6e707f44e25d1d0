use crate::state::{Page, ViewState};

pub const APP_TITLE: &str = "AI Resume Screener";

pub fn render_header(state: &ViewState) -> String {
    let nav = [Page::Home, Page::Resumes]
        .iter()
        .map(|page| {
            if *page == state.page {
                format!("[{}]", page.label())
            } else {
                format!(" {} ", page.label())
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    format!("{}  (AI-Powered)\n{}", APP_TITLE, nav)
}
