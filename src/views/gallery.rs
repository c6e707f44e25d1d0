// src/views/gallery.rs
//! Uploaded resumes page: filename filter plus view/download actions

use crate::types::ResumeFile;

/// Case-insensitive substring match on filenames. Derived on every call,
/// never stored.
pub fn filter_resumes<'a>(resumes: &'a [ResumeFile], term: &str) -> Vec<&'a ResumeFile> {
    let needle = term.to_lowercase();
    resumes
        .iter()
        .filter(|resume| resume.filename.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, PartialEq)]
pub enum GalleryView<'a> {
    /// Nothing has been uploaded
    NoResumes,
    /// Resumes exist but the filter hides all of them
    NoMatches,
    Items(Vec<&'a ResumeFile>),
}

#[derive(Debug, Default)]
pub struct ResumeGallery {
    search_term: String,
}

impl ResumeGallery {
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    pub fn view<'a>(&self, resumes: &'a [ResumeFile]) -> GalleryView<'a> {
        let filtered = filter_resumes(resumes, &self.search_term);
        if !filtered.is_empty() {
            GalleryView::Items(filtered)
        } else if resumes.is_empty() {
            GalleryView::NoResumes
        } else {
            GalleryView::NoMatches
        }
    }

    /// Resume at a 0-based position of the filtered list
    pub fn item<'a>(&self, resumes: &'a [ResumeFile], index: usize) -> Option<&'a ResumeFile> {
        filter_resumes(resumes, &self.search_term)
            .get(index)
            .copied()
    }

    pub fn render(&self, resumes: &[ResumeFile]) -> String {
        let shown = filter_resumes(resumes, &self.search_term).len();
        let mut lines = vec![
            "Uploaded Resumes".to_string(),
            "Manage and view all uploaded resume files".to_string(),
            format!("[{} of {} resumes]", shown, resumes.len()),
        ];

        if !self.search_term.is_empty() {
            lines.push(format!("Filter: {}", self.search_term));
        }

        match self.view(resumes) {
            GalleryView::NoResumes => {
                lines.push("No Resumes Uploaded".to_string());
                lines.push("Upload some PDF resumes to get started with AI analysis".to_string());
            }
            GalleryView::NoMatches => {
                lines.push("No Matching Resumes".to_string());
                lines.push("Try adjusting your search term".to_string());
            }
            GalleryView::Items(items) => {
                for (i, resume) in items.iter().enumerate() {
                    lines.push(format!("  {}. {}  (PDF Resume)", i + 1, resume.title()));
                }
            }
        }

        lines.join("\n")
    }
}
