use crate::state::ViewState;

/// Preview modal, if one is open
pub fn render_preview(state: &ViewState) -> Option<String> {
    state.preview.as_ref().map(|target| {
        format!(
            "Resume Preview: {}\n{}\n(:close to dismiss)",
            target.name, target.url
        )
    })
}
