//! Context discovery and per-context failure isolation.

use std::fmt;
use std::path::{Path, PathBuf};

use kt_graph::ContextTopics;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::validate::ValidationWarning;
use crate::{SourceError, SourceResult, load_topics_file};

/// File name looked up inside each context directory.
pub const TOPICS_FILE: &str = "topics.yaml";

/// A context that loaded and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedContext {
    pub topics: ContextTopics,
    pub warnings: Vec<ValidationWarning>,
    pub path: PathBuf,
}

/// A context that failed to load; the others are unaffected.
#[derive(Debug)]
pub struct ContextFailure {
    pub context: String,
    pub error: SourceError,
}

impl fmt::Display for ContextFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "context '{}': {}", self.context, self.error)?;
        if let Some(cause) = std::error::Error::source(&self.error) {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

pub type ContextResult = Result<LoadedContext, ContextFailure>;

/// Something that yields topic declarations per context.
///
/// The outer error is for the source as a whole (an unreadable root); each
/// context then succeeds or fails on its own.
pub trait TopicSource {
    fn describe(&self) -> String;

    fn fetch(&self) -> SourceResult<Vec<ContextResult>>;
}

/// Contexts laid out on disk as `<root>/<context>/topics.yaml`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Context directories sorted by name. Hidden directories are skipped.
    fn context_dirs(&self) -> SourceResult<Vec<(String, PathBuf)>> {
        let scan_err = |source| SourceError::Scan {
            path: self.root.clone(),
            source,
        };

        let mut dirs = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(scan_err)? {
            let entry = entry.map_err(scan_err)?;
            if !entry.file_type().map_err(scan_err)?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(String::from) else {
                warn!(path = %entry.path().display(), "skipping non UTF-8 context directory");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            dirs.push((name, entry.path()));
        }
        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(dirs)
    }
}

impl TopicSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn fetch(&self) -> SourceResult<Vec<ContextResult>> {
        if !self.root.exists() {
            debug!(root = %self.root.display(), "contracts root does not exist");
            return Ok(Vec::new());
        }

        let dirs = self.context_dirs()?;
        let results = dirs
            .par_iter()
            .filter_map(|(context, dir)| {
                let path = dir.join(TOPICS_FILE);
                if !path.is_file() {
                    debug!(context = %context, "no {TOPICS_FILE}, skipping");
                    return None;
                }
                Some(
                    load_topics_file(context, &path).map_err(|error| ContextFailure {
                        context: context.clone(),
                        error,
                    }),
                )
            })
            .collect();

        Ok(results)
    }
}

/// Successful contexts plus the failures that were skipped.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub contexts: Vec<LoadedContext>,
    pub failures: Vec<ContextFailure>,
}

impl ScanReport {
    /// The validated topics of every loaded context, in load order.
    pub fn topics(&self) -> Vec<ContextTopics> {
        self.contexts.iter().map(|c| c.topics.clone()).collect()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationWarning> {
        self.contexts.iter().flat_map(|c| c.warnings.iter())
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.warnings().next().is_none()
    }
}

/// Split per-context results into successes and logged failures.
pub fn collect_contexts(results: Vec<ContextResult>) -> ScanReport {
    let mut report = ScanReport::default();
    for result in results {
        match result {
            Ok(loaded) => {
                for warning in &loaded.warnings {
                    warn!("{warning}");
                }
                debug!(
                    context = %loaded.topics.context,
                    topics = loaded.topics.topics.len(),
                    "loaded context"
                );
                report.contexts.push(loaded);
            }
            Err(failure) => {
                warn!("skipping {failure}");
                report.failures.push(failure);
            }
        }
    }
    info!(
        loaded = report.contexts.len(),
        failed = report.failures.len(),
        "context scan complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn missing_root_yields_nothing() {
        let source = DirectorySource::new("/nonexistent/kt-source/contracts");
        assert!(source.fetch().unwrap().is_empty());
    }

    #[test]
    fn collect_splits_successes_and_failures() {
        let ok = LoadedContext {
            topics: ContextTopics::new("good", vec![]),
            warnings: vec![],
            path: PathBuf::from("good/topics.yaml"),
        };
        let failed = ContextFailure {
            context: "bad".into(),
            error: SourceError::Validation(ValidationError::DuplicateTopic {
                context: "bad".into(),
                topic: "t".into(),
            }),
        };
        let report = collect_contexts(vec![Ok(ok), Err(failed)]);
        assert_eq!(report.contexts.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.topics()[0].context, "good");
        assert!(!report.is_clean());
        assert!(report.failures[0].to_string().starts_with("context 'bad'"));
    }
}
