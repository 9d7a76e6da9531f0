//! Scripted sessions
//!
//! Drives a `ClipSession` from a JSON script instead of a live UI: page
//! image files are loaded as the document, pointer events are replayed in
//! device pixels, and every committed region and reconstructed page is
//! written to the output directory.
//!
//! ```json
//! {
//!   "pages": ["page-1.png"],
//!   "viewport": { "left": 0, "top": 0, "width": 612, "height": 792 },
//!   "steps": [
//!     { "kind": "down", "x": 40, "y": 40 }, { "kind": "up" },
//!     { "kind": "commit", "page": 0 },
//!     { "kind": "reconstruct", "page": 0 }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::capture::PageRasterizer;
use crate::config::ClipConfig;
use crate::domain::Viewport;
use crate::error::{ClipError, ClipResult};
use crate::export::{self, ExportKind};
use crate::session::handlers::handle_msg;
use crate::session::messages::Msg;
use crate::session::state::ClipSession;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Page images, relative to the script's directory
    pub pages: Vec<PathBuf>,
    /// Display rectangle of the shown page (default: unscaled at the origin)
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Overrides the configured export directory
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Msg(Msg),
    Action(Action),
}

/// Steps that need the async runtime or change the display
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Commit { page: usize },
    Reconstruct { page: usize },
    ShowPage { page: usize },
    SetViewport { viewport: Viewport },
}

/// Files written by a replay
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub regions: Vec<PathBuf>,
    pub pages: Vec<PathBuf>,
}

/// Page images read from disk, one file per page
pub struct ImageFiles(pub Vec<PathBuf>);

impl PageRasterizer for ImageFiles {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn render_page(&self, index: usize) -> ClipResult<Vec<u8>> {
        let path = self.0.get(index).ok_or(ClipError::PageOutOfRange {
            index,
            count: self.0.len(),
        })?;
        Ok(std::fs::read(path)?)
    }
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }
}

fn unscaled_viewport(session: &ClipSession, page: usize) -> Option<Viewport> {
    let page = session.pages().get(page)?;
    Some(Viewport {
        left: 0.0,
        top: 0.0,
        width: page.width() as f32,
        height: page.height() as f32,
    })
}

/// Run `script`, resolving page paths against `base_dir`
pub async fn run_script(
    script: &Script,
    base_dir: &Path,
    config: &ClipConfig,
) -> anyhow::Result<ReplayReport> {
    let out_dir = match &script.output_dir {
        Some(dir) => base_dir.join(dir),
        None => export::export_dir(config).context("no export directory available")?,
    };

    let mut session = ClipSession::new(config);
    let files = ImageFiles(script.pages.iter().map(|p| base_dir.join(p)).collect());
    let count = session.load_pages(&files).context("loading pages")?;
    log::info!("Replaying {} steps over {count} pages", script.steps.len());

    if let Some(viewport) = script.viewport.or_else(|| unscaled_viewport(&session, 0)) {
        session.set_viewport(viewport);
    }

    let mut report = ReplayReport::default();
    for (n, step) in script.steps.iter().enumerate() {
        match step {
            Step::Msg(msg) => handle_msg(&mut session, *msg),
            Step::Action(Action::Commit { page }) => match session.commit_clip(*page).await {
                Ok(region) => {
                    let path = export::image_path(&out_dir, ExportKind::Region, report.regions.len());
                    export::save_png(region.extracted_raster(), &path)?;
                    report.regions.push(path);
                }
                Err(err @ ClipError::InsufficientPoints { .. }) => {
                    log::warn!("Step {n}: {err}");
                }
                Err(err) => return Err(err).with_context(|| format!("step {n}: commit")),
            },
            Step::Action(Action::Reconstruct { page }) => {
                let bytes = session
                    .reconstruct_page(*page)
                    .await
                    .with_context(|| format!("step {n}: reconstruct page {page}"))?;
                match bytes {
                    Some(bytes) => {
                        let path = export::image_path(&out_dir, ExportKind::Page, report.pages.len());
                        export::save_png(&bytes, &path)?;
                        report.pages.push(path);
                    }
                    None => log::info!("Step {n}: page {page} has no regions"),
                }
            }
            Step::Action(Action::ShowPage { page }) => {
                session
                    .show_page(*page)
                    .with_context(|| format!("step {n}: show page"))?;
                if script.viewport.is_none()
                    && let Some(viewport) = unscaled_viewport(&session, *page)
                {
                    session.set_viewport(viewport);
                }
            }
            Step::Action(Action::SetViewport { viewport }) => session.set_viewport(*viewport),
        }
    }

    Ok(report)
}
