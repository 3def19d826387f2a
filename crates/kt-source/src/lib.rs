//! kt-source: topic declarations from `topics.yaml` files.
//!
//! Parses and validates per-context topic files and discovers contexts laid
//! out as `<root>/<context>/topics.yaml`. Each context loads on its own: a
//! broken file is reported and skipped, never fatal to the rest.

pub mod discovery;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{
    ContextFailure, ContextResult, DirectorySource, LoadedContext, ScanReport, TOPICS_FILE,
    TopicSource, collect_contexts,
};
pub use schema::{TopicDef, TopicsDoc};
pub use validate::{Validated, ValidationError, ValidationWarning, validate_topics};

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to scan {path}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error in context '{context}': {source}")]
    Yaml {
        context: String,
        source: serde_yaml::Error,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Parse and validate the text of a topics file.
///
/// An empty document declares no topics.
pub fn parse_topics(context: &str, text: &str) -> SourceResult<Validated> {
    let doc: Option<TopicsDoc> = if text.trim().is_empty() {
        None
    } else {
        serde_yaml::from_str(text).map_err(|source| SourceError::Yaml {
            context: context.to_string(),
            source,
        })?
    };
    let defs = doc.map(TopicsDoc::into_defs).unwrap_or_default();
    Ok(validate_topics(context, defs)?)
}

/// Read, parse and validate one topics file.
pub fn load_topics_file(context: &str, path: &Path) -> SourceResult<LoadedContext> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let Validated { topics, warnings } = parse_topics(context, &text)?;
    Ok(LoadedContext {
        topics,
        warnings,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPICS: &str = r#"
- name: topic1
  partitions: 3
  logCompaction: true
  producers: [serviceA, serviceB]
  consumers: [serviceC]
- name: topic2
  producers:
    - serviceE
  consumers:
    - serviceA
    - serviceF
"#;

    #[test]
    fn parses_topic_list() {
        let validated = parse_topics("test", TOPICS).unwrap();
        let topics = &validated.topics.topics;
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].name, "topic1");
        assert_eq!(topics[0].partitions, 3);
        assert!(topics[0].log_compaction);
        assert_eq!(topics[0].producers, vec!["serviceA", "serviceB"]);
        assert_eq!(topics[1].consumers, vec!["serviceA", "serviceF"]);
        assert_eq!(topics[1].partitions, 1);
    }

    #[test]
    fn single_mapping_is_one_topic() {
        let validated = parse_topics("ctx", "name: solo\nproducers: [p]\n").unwrap();
        assert_eq!(validated.topics.topics.len(), 1);
        assert_eq!(validated.topics.topics[0].name, "solo");
    }

    #[test]
    fn null_lists_are_empty() {
        let validated = parse_topics("ctx", "- name: t\n  producers: ~\n  consumers: [c]\n").unwrap();
        assert!(validated.topics.topics[0].producers.is_empty());
    }

    #[test]
    fn empty_document_has_no_topics() {
        let validated = parse_topics("ctx", "\n").unwrap();
        assert!(validated.topics.topics.is_empty());
    }

    #[test]
    fn malformed_yaml_is_reported_with_context() {
        let err = parse_topics("broken", "- name: [unclosed\n").unwrap_err();
        assert!(matches!(err, SourceError::Yaml { ref context, .. } if context == "broken"));
    }

    #[test]
    fn shape_errors_surface_as_validation() {
        let err = parse_topics("ctx", "- partitions: 2\n").unwrap_err();
        assert!(matches!(
            err,
            SourceError::Validation(ValidationError::MissingName { .. })
        ));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let path = std::env::temp_dir().join("kt_source_definitely_missing.yaml");
        let err = load_topics_file("ctx", &path).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }
}
