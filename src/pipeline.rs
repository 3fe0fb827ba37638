//! Source ingestion pipeline
//!
//! Orchestrates the full analysis pass:
//! 1. Walk Ruby sources under the root, respecting .gitignore
//! 2. Parse each file into a per-file graph (parallel)
//! 3. Union the per-file graphs into one
//! 4. Resolve references into edges

use anyhow::{bail, Result};
use ignore::WalkBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::analysis::{self, AnalysisResult};
use crate::config::Config;
use crate::graph::{GraphStats, ObjectGraph};
use crate::parsers;

/// Full analysis pipeline.
pub struct Pipeline {
    root: PathBuf,
    config: Config,
}

impl Pipeline {
    /// Create a new pipeline for the given root path.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Run the full pipeline and return the resolved graph.
    pub fn run(&self) -> Result<(ObjectGraph, RunStats)> {
        let start = Instant::now();

        let files = self.collect_files()?;
        info!("Analyzing {} files under {}", files.len(), self.root.display());

        let progress = if files.len() > 1 {
            let bar = ProgressBar::new(files.len() as u64);
            bar.set_style(bar_style());
            bar.set_message("Analyzing files...");
            bar
        } else {
            ProgressBar::hidden()
        };

        let results: Vec<(&PathBuf, AnalysisResult<ObjectGraph>)> = files
            .par_iter()
            .map(|path| {
                let result = analysis::analyze_file(path);
                progress.inc(1);
                (path, result)
            })
            .collect();

        progress.finish_and_clear();

        let mut graph = ObjectGraph::new();
        let mut failed = 0;
        for (path, result) in results {
            match result {
                Ok(unit) => graph.union(unit),
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    warn!("{}", e);
                    debug!("Skipping {}", path.display());
                    failed += 1;
                }
            }
        }

        analysis::resolve(&mut graph);

        let stats = RunStats {
            files: files.len(),
            failed,
            elapsed: start.elapsed(),
        };

        Ok((graph, stats))
    }

    /// Collect Ruby files under the root, respecting .gitignore and the
    /// project's exclusion patterns. A file root is returned as-is.
    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            bail!("Path does not exist: {}", self.root.display());
        }

        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .build();

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !parsers::supported_extensions().contains(&ext) {
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if self.config.should_exclude(relative) {
                debug!("Excluding {}", relative.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }
}

/// Create bar progress style
fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap()
        .progress_chars("█▓▒░  ")
}

/// Statistics from a pipeline run.
#[derive(Default, Debug)]
pub struct RunStats {
    /// Number of files collected for analysis
    pub files: usize,
    /// Number of files skipped due to parse failures
    pub failed: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStats {
    /// Get a summary string.
    pub fn summary(&self, graph: &GraphStats) -> String {
        let mut parts = vec![
            format!("{} files", self.files),
            format!("{} nodes", graph.nodes),
            format!("{} edges", graph.edges),
            format!("{} associations", graph.associations),
        ];

        if graph.dangling_edges > 0 {
            parts.push(format!("{} dangling", graph.dangling_edges));
        }
        if self.failed > 0 {
            parts.push(format!("{} skipped", self.failed));
        }
        parts.push(format!("{:.2}s", self.elapsed.as_secs_f64()));

        parts.join(", ")
    }
}
