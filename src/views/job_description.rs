use crate::state::JobDescriptionStatus;

pub fn render_job_description(status: &JobDescriptionStatus) -> String {
    let line = if status.uploading.is_set() {
        "Processing job description...".to_string()
    } else if let Some(error) = &status.error {
        format!("! {}", error)
    } else if status.success {
        "Job description uploaded successfully!".to_string()
    } else {
        "Type a job description with :jd <text>, or upload a PDF/DOCX with :jd-file <path>"
            .to_string()
    };

    format!("Job Description\n{}", line)
}
