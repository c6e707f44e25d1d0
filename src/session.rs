// src/session.rs
//! Interactive terminal session: one event loop over user input, debounced
//! searches and the post-upload refresh

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep_until, Instant};

use crate::app_log;
use crate::config::ClientConfig;
use crate::controller::ScreenerController;
use crate::core::ScreeningApi;
use crate::state::{Page, ViewState};
use crate::types::{JobDescription, UploadFile};
use crate::views::{render_page, ResumeGallery, SearchBox, UploadPanel};

pub const HELP: &str = "\
Type to search (dispatched after a pause). Commands:
  :home | :resumes          switch page
  :quick N                  run quick search N
  :filter TERM              filter uploaded resumes (empty clears)
  :upload PATH...           upload PDF resumes
  :jd TEXT | :jd-file PATH  upload a job description
  :preview N | :close       open/close preview of match or resume N
  :download N               download resume N of the gallery
  :refresh                  reload status and resume list
  :help | :quit";

/// One line of user input
#[derive(Debug, PartialEq)]
pub enum SessionInput {
    Type(String),
    Page(Page),
    Quick(usize),
    Filter(String),
    Upload(Vec<PathBuf>),
    JobText(String),
    JobFile(PathBuf),
    Preview(usize),
    Close,
    Download(usize),
    Refresh,
    Help,
    Quit,
}

impl SessionInput {
    /// Plain lines are search box input; `:` lines are commands.
    /// Positions are 1-based for the user and 0-based here.
    pub fn parse(line: &str) -> Result<Self> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(SessionInput::Type(line.to_string()));
        };

        let (name, rest) = match command.trim().split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command.trim(), ""),
        };

        let input = match name {
            "home" => SessionInput::Page(Page::Home),
            "resumes" => SessionInput::Page(Page::Resumes),
            "quick" => SessionInput::Quick(position(rest)?),
            "filter" => SessionInput::Filter(rest.to_string()),
            "upload" => {
                let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
                if paths.is_empty() {
                    anyhow::bail!("Usage: :upload PATH...");
                }
                SessionInput::Upload(paths)
            }
            "jd" => SessionInput::JobText(rest.to_string()),
            "jd-file" if !rest.is_empty() => SessionInput::JobFile(PathBuf::from(rest)),
            "jd-file" => anyhow::bail!("Usage: :jd-file PATH"),
            "preview" => SessionInput::Preview(position(rest)?),
            "close" => SessionInput::Close,
            "download" => SessionInput::Download(position(rest)?),
            "refresh" => SessionInput::Refresh,
            "help" => SessionInput::Help,
            "quit" | "q" | "exit" => SessionInput::Quit,
            other => anyhow::bail!("Unknown command :{} (try :help)", other),
        };

        Ok(input)
    }
}

fn position(raw: &str) -> Result<usize> {
    let n: usize = raw
        .parse()
        .with_context(|| format!("Expected a number, got '{}'", raw))?;
    n.checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("Positions start at 1"))
}

pub struct Session<A> {
    controller: ScreenerController<A>,
    search: SearchBox,
    /// Typed queries whose debounce has elapsed, in arrival order
    dispatched: UnboundedReceiver<String>,
    gallery: ResumeGallery,
    upload: UploadPanel,
    download_dir: PathBuf,
}

impl<A: ScreeningApi> Session<A> {
    pub fn new(controller: ScreenerController<A>, config: &ClientConfig) -> Self {
        let (search, dispatched) = SearchBox::from_config(config);
        Self {
            controller,
            search,
            dispatched,
            gallery: ResumeGallery::default(),
            upload: UploadPanel::default(),
            download_dir: config.download_dir.clone(),
        }
    }

    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn controller(&self) -> &ScreenerController<A> {
        &self.controller
    }

    pub fn render(&self) -> String {
        render_page(self.state(), &self.upload, &self.search, &self.gallery)
    }

    /// Apply one input. Returns false when the session should end.
    pub async fn apply(&mut self, input: SessionInput) -> bool {
        match input {
            SessionInput::Type(text) => {
                if SearchBox::is_enabled(self.state()) {
                    self.search.type_query(&text);
                } else {
                    println!("Search is disabled until resumes are indexed and no search is running.");
                }
            }
            SessionInput::Quick(index) => {
                if !SearchBox::is_enabled(self.state()) {
                    println!("Search is disabled until resumes are indexed and no search is running.");
                } else if let Some(query) = self.search.quick_search(index) {
                    self.discard_settled_input();
                    let _ = self.controller.handle_search(&query).await;
                } else {
                    println!("No quick search {}", index + 1);
                }
            }
            SessionInput::Page(page) => self.controller.handle_page_change(page),
            SessionInput::Filter(term) => self.gallery.set_search_term(&term),
            SessionInput::Upload(paths) => self.upload_paths(paths).await,
            SessionInput::JobText(text) => {
                let _ = self
                    .controller
                    .upload_job_description(JobDescription::Text(text))
                    .await;
            }
            SessionInput::JobFile(path) => match UploadFile::from_path(&path).await {
                Ok(file) => {
                    let _ = self
                        .controller
                        .upload_job_description(JobDescription::File(file))
                        .await;
                }
                Err(e) => println!("{:#}", e),
            },
            SessionInput::Preview(index) => self.preview(index),
            SessionInput::Close => self.controller.close_preview(),
            SessionInput::Download(index) => {
                let resume = self
                    .gallery
                    .item(&self.state().uploaded_resumes, index)
                    .cloned();
                match resume {
                    Some(resume) => {
                        if let Ok(path) = self
                            .controller
                            .download_resume(&resume, &self.download_dir)
                            .await
                        {
                            println!("Saved {}", path.display());
                        }
                    }
                    None => println!("No resume at position {}", index + 1),
                }
            }
            SessionInput::Refresh => {
                self.controller.refresh_status().await;
                self.controller.refresh_resumes().await;
            }
            SessionInput::Help => println!("{}", HELP),
            SessionInput::Quit => return false,
        }
        true
    }

    /// Search input that settled in the debouncer
    pub async fn dispatch(&mut self, query: String) {
        if SearchBox::is_enabled(self.state()) {
            let _ = self.controller.handle_search(&query).await;
        } else {
            app_log!(debug, "Dropping debounced query while search is disabled");
        }
    }

    /// Typed queries that settled before a quick search must not run after it.
    fn discard_settled_input(&mut self) {
        while let Ok(stale) = self.dispatched.try_recv() {
            app_log!(debug, "Discarding superseded query '{}'", stale);
        }
    }

    async fn upload_paths(&mut self, paths: Vec<PathBuf>) {
        let (accepted, rejected) = UploadPanel::accept(paths);
        for path in &rejected {
            println!("Skipping non-PDF file: {}", path.display());
        }

        let mut files = Vec::with_capacity(accepted.len());
        for path in &accepted {
            match UploadFile::from_path(path).await {
                Ok(file) => files.push(file),
                Err(e) => println!("{:#}", e),
            }
        }
        if files.is_empty() {
            return;
        }

        self.upload.clear();
        let names = files.iter().map(|f| f.file_name.clone()).collect();
        if self.controller.handle_upload(files).await.is_ok() {
            self.upload.mark_processed(names);
        }
    }

    fn preview(&mut self, index: usize) {
        let page = self.state().page;
        match page {
            Page::Home => {
                if self.controller.preview_match(index).is_err() {
                    println!("No matched candidate at position {}", index + 1);
                }
            }
            Page::Resumes => {
                let resume = self
                    .gallery
                    .item(&self.state().uploaded_resumes, index)
                    .cloned();
                match resume {
                    Some(resume) => self.controller.open_preview(resume.filename, resume.url),
                    None => println!("No resume at position {}", index + 1),
                }
            }
        }
    }

    fn print_notices(&mut self) {
        for notice in self.controller.take_notices() {
            println!("⚠️  {}", notice);
        }
    }

    fn redraw(&mut self) {
        println!("\n{}\n{}", "-".repeat(60), self.render());
        self.print_notices();
    }
}

/// Drive a session from stdin until `:quit` or end of input.
pub async fn run<A: ScreeningApi>(
    controller: ScreenerController<A>,
    config: &ClientConfig,
) -> Result<()> {
    let mut session = Session::new(controller, config);
    drive(&mut session, BufReader::new(tokio::io::stdin())).await?;

    app_log!(info, "Session ended");
    Ok(())
}

/// Event loop over `input` lines, settled search input and the scheduled
/// post-upload refresh. Settled input is handled before anything else so
/// dispatches keep their arrival order.
pub async fn drive<A, R>(session: &mut Session<A>, input: R) -> Result<()>
where
    A: ScreeningApi,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    session.controller.initialize().await;
    println!("{}", HELP);
    session.redraw();

    loop {
        let refresh_due = session.controller.refresh_due();

        tokio::select! {
            biased;

            Some(query) = session.dispatched.recv() => {
                session.dispatch(query).await;
            }
            _ = sleep_until(refresh_due.unwrap_or_else(Instant::now)), if refresh_due.is_some() => {
                session.controller.run_pending_refresh().await;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match SessionInput::parse(&line) {
                    Ok(input) => {
                        if !session.apply(input).await {
                            break;
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }

        session.redraw();
    }

    Ok(())
}
