// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::app_log;
use crate::config::ClientConfig;
use crate::controller::ScreenerController;
use crate::core::ScreeningApi;
use crate::errors::ControllerError;
use crate::session;
use crate::types::{JobDescription, ResumeFile, UploadFile};
use crate::utils::resolve_url;
use crate::views::job_description::render_job_description;
use crate::views::preview::render_preview;
use crate::views::results::render_results;
use crate::views::{agent, ResumeGallery, UploadPanel, QUICK_SEARCHES};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Upload resumes and search them with the AI screening service")]
pub struct Cli {
    /// Screening service URL, overrides SCREENER_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the index status and the active agent
    Status,
    /// List uploaded resumes
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Upload PDF resumes
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Upload a job description as text or as a PDF/DOCX file
    UploadJd(JobDescriptionArgs),
    /// Ask the screening agents a question
    Search { query: String },
    /// Run one of the predefined searches (1-based)
    Quick { index: usize },
    /// Save an uploaded resume locally
    Download {
        filename: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show the preview link of an uploaded resume
    Preview {
        name: String,
        /// Open the resume in the system viewer
        #[arg(long)]
        open: bool,
    },
    /// Interactive screen with debounced search
    Session,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct JobDescriptionArgs {
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ClientConfig::load(cli.base_url)?;
    let controller = crate::connect(&config)?;
    run_once(controller, &config, cli.command).await
}

/// One-shot commands run the mount fetches first, then a single action.
pub async fn run_once<A: ScreeningApi>(
    mut controller: ScreenerController<A>,
    config: &ClientConfig,
    command: Command,
) -> Result<()> {
    if let Command::Session = command {
        return session::run(controller, config).await;
    }

    controller.initialize().await;
    let outcome = execute(&mut controller, config, command).await;

    // Alert notices reach the terminal even when the command failed
    print_notices(&mut controller);
    outcome
}

async fn execute<A: ScreeningApi>(
    controller: &mut ScreenerController<A>,
    config: &ClientConfig,
    command: Command,
) -> Result<()> {
    match command {
        Command::Status => {
            let state = controller.state();
            println!(
                "Database: {} ({} chunks, {} resumes)",
                if state.database_ready() { "ready" } else { "empty" },
                state.database_status.chunks,
                state.resume_count()
            );
            println!("{}", agent::render_agent_status(state));
        }

        Command::List { filter } => {
            let mut gallery = ResumeGallery::default();
            if let Some(term) = filter {
                gallery.set_search_term(&term);
            }
            println!("{}", gallery.render(&controller.state().uploaded_resumes));
        }

        Command::Upload { files } => upload(controller, files).await?,

        Command::UploadJd(args) => {
            let job_description = match (args.text, args.file) {
                (Some(text), _) => JobDescription::Text(text),
                (None, Some(path)) => JobDescription::File(UploadFile::from_path(&path).await?),
                (None, None) => anyhow::bail!("Provide --text or --file"),
            };
            let result = controller.upload_job_description(job_description).await;
            println!("{}", render_job_description(controller.job_description_status()));
            result?;
        }

        Command::Search { query } => search(controller, &query).await?,

        Command::Quick { index } => {
            let query = index
                .checked_sub(1)
                .and_then(|i| QUICK_SEARCHES.get(i))
                .ok_or_else(|| {
                    anyhow::anyhow!("Quick search must be between 1 and {}", QUICK_SEARCHES.len())
                })?;
            println!("Searching: {}", query);
            search(controller, query).await?;
        }

        Command::Download { filename, out } => {
            let resume = find_resume(&controller.state().uploaded_resumes, &filename)?;
            let dir = out.unwrap_or_else(|| config.download_dir.clone());
            let path = controller.download_resume(&resume, &dir).await?;
            println!("Saved {}", path.display());
        }

        Command::Preview { name, open } => {
            let resume = find_resume(&controller.state().uploaded_resumes, &name)?;
            controller.open_preview(resume.filename.clone(), resume.url.clone());
            if let Some(modal) = render_preview(controller.state()) {
                println!("{}", modal);
            }
            if open {
                open_in_viewer(&config.api_base_url, &resume.url)?;
            }
        }

        Command::Session => anyhow::bail!("The session command is interactive"),
    }

    Ok(())
}

async fn upload<A: ScreeningApi>(
    controller: &mut ScreenerController<A>,
    paths: Vec<PathBuf>,
) -> Result<()> {
    let (accepted, rejected) = UploadPanel::accept(paths);
    for path in &rejected {
        println!("Skipping non-PDF file: {}", path.display());
    }

    let mut files = Vec::with_capacity(accepted.len());
    for path in &accepted {
        files.push(UploadFile::from_path(path).await?);
    }
    let names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();

    println!("Processing resumes with AI...");
    controller.handle_upload(files).await?;

    let mut panel = UploadPanel::default();
    panel.mark_processed(names);
    println!("{}", panel.render(controller.state()));

    // The service indexes in the background; show the refreshed counts.
    controller.run_pending_refresh().await;
    println!(
        "Indexed chunks: {}, resumes: {}",
        controller.state().database_status.chunks,
        controller.state().resume_count()
    );
    Ok(())
}

async fn search<A: ScreeningApi>(controller: &mut ScreenerController<A>, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(ControllerError::EmptyQuery.into());
    }
    controller.handle_search(query).await?;
    println!("{}", render_results(controller.state()));
    Ok(())
}

fn print_notices<A: ScreeningApi>(controller: &mut ScreenerController<A>) {
    for notice in controller.take_notices() {
        println!("⚠️  {}", notice);
    }
}

/// Match by exact filename first, then by title without the extension
fn find_resume(resumes: &[ResumeFile], name: &str) -> Result<ResumeFile> {
    resumes
        .iter()
        .find(|r| r.filename == name)
        .or_else(|| resumes.iter().find(|r| r.title().eq_ignore_ascii_case(name)))
        .cloned()
        .with_context(|| format!("No uploaded resume named '{}'", name))
}

fn open_in_viewer(base_url: &str, url: &str) -> Result<()> {
    let target = resolve_url(base_url, url);
    app_log!(info, "Opening {}", target);
    open::that(&target).with_context(|| format!("Failed to open {}", target))
}
