//! @ai:module:intent PDF rendering of the HTML report and temporary directory cleanup
//! @ai:module:layer infrastructure
//! @ai:module:public_api PdfRendererTrait, ChromePdfRenderer, CleanupConfirmation, ConfirmWith
//! @ai:module:stateless true

use crate::config::PdfConfig;
use crate::error::{ReportError, Result};
use anyhow::Context;
use headless_chrome::{Browser, LaunchOptionsBuilder};
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

/// @ai:intent Trait for printing an HTML document to PDF
pub trait PdfRendererTrait: Send + Sync {
    /// @ai:intent Render `html_path` (with its relative images) into `pdf_path`
    fn render(&self, html_path: &Path, pdf_path: &Path) -> Result<()>;
}

/// @ai:intent Decides whether the temporary report directory is deleted
pub trait CleanupConfirmation {
    /// @ai:intent Called with the temporary directory and the files it holds
    fn confirm(&self, temp_dir: &Path, files: &[PathBuf]) -> bool;
}

/// @ai:intent Pre-supplied answer to the cleanup question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmWith(pub bool);

impl CleanupConfirmation for ConfirmWith {
    fn confirm(&self, _temp_dir: &Path, _files: &[PathBuf]) -> bool {
        self.0
    }
}

impl<F> CleanupConfirmation for F
where
    F: Fn(&Path, &[PathBuf]) -> bool,
{
    fn confirm(&self, temp_dir: &Path, files: &[PathBuf]) -> bool {
        self(temp_dir, files)
    }
}

/// @ai:intent Prints pages with a headless Chromium/Chrome
pub struct ChromePdfRenderer {
    browser: Option<PathBuf>,
}

impl ChromePdfRenderer {
    /// @ai:intent Create a renderer using the browser found on the system
    /// @ai:effects pure
    pub fn new() -> Self {
        Self { browser: None }
    }

    /// @ai:effects pure
    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            browser: config.browser.clone(),
        }
    }

    /// @ai:effects io
    fn print(&self, html_path: &Path) -> anyhow::Result<Vec<u8>> {
        let html_path = html_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", html_path.display()))?;
        let url = file_url(&html_path)?;

        let mut builder = LaunchOptionsBuilder::default();
        builder.headless(true).sandbox(false);

        if let Some(path) = &self.browser {
            builder.path(Some(path.clone()));
        }

        let options = builder
            .build()
            .context("unable to construct headless browser launch options")?;
        let browser = Browser::new(options).context("failed to launch Chromium/Chrome")?;
        let tab = browser.new_tab().context("failed to open report tab")?;

        tab.navigate_to(url.as_str())
            .with_context(|| format!("failed to navigate to {url}"))?;
        tab.wait_until_navigated()
            .with_context(|| format!("navigation did not complete for {url}"))?;

        tab.print_to_pdf(None).context("failed to print report to PDF")
    }
}

impl Default for ChromePdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRendererTrait for ChromePdfRenderer {
    /// @ai:effects io, fs:write
    fn render(&self, html_path: &Path, pdf_path: &Path) -> Result<()> {
        let pdf = self
            .print(html_path)
            .map_err(|e| ReportError::Pdf(format!("{e:#}")))?;

        std::fs::write(pdf_path, pdf)?;
        tracing::info!("PDF written to {}", pdf_path.display());
        Ok(())
    }
}

/// @ai:intent Create a fresh temporary directory, refusing to reuse an existing one
/// @ai:effects fs:write
pub fn create_temp_dir(path: &Path) -> Result<()> {
    std::fs::create_dir(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => ReportError::TempDirExists(path.to_path_buf()),
        _ => ReportError::Io(e),
    })
}

/// @ai:intent List every file below a directory, sorted by path
/// @ai:effects fs:read
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ReportError::walk(dir, e))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// @ai:intent Log the temporary files, ask for confirmation and delete the directory if granted
/// @ai:effects fs:write
/// @ai:post returns whether the directory was removed
pub fn cleanup_temp_dir(temp_dir: &Path, confirmation: &dyn CleanupConfirmation) -> Result<bool> {
    let files = list_files(temp_dir)?;

    tracing::info!("Temporary directory {} holds {} files", temp_dir.display(), files.len());
    for file in &files {
        tracing::debug!("  {}", file.display());
    }

    if confirmation.confirm(temp_dir, &files) {
        std::fs::remove_dir_all(temp_dir)?;
        tracing::info!("Removed {}", temp_dir.display());
        Ok(true)
    } else {
        tracing::warn!("Keeping temporary files in {}", temp_dir.display());
        Ok(false)
    }
}

fn file_url(path: &Path) -> anyhow::Result<Url> {
    Url::from_file_path(path)
        .map_err(|_| anyhow::anyhow!("{} is not an absolute path", path.display()))
}
