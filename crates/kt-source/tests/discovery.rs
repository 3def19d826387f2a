//! Directory discovery against real files under the temp dir.

use std::fs;
use std::path::{Path, PathBuf};

use kt_source::{DirectorySource, SourceError, TOPICS_FILE, TopicSource, collect_contexts};

fn scratch_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("kt_source_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(&root).unwrap();
    root
}

fn write_context(root: &Path, context: &str, text: &str) {
    let dir = root.join(context);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(TOPICS_FILE), text).unwrap();
}

#[test]
fn broken_context_does_not_block_others() {
    let root = scratch_root("mixed");
    write_context(
        &root,
        "orders",
        "- name: order-created\n  producers: [checkout]\n  consumers: [billing]\n",
    );
    write_context(&root, "billing", "- name: [unclosed\n");
    write_context(&root, "audit", "- name: audit-log\n  partitions: 0\n");

    let results = DirectorySource::new(&root).fetch().unwrap();
    let report = collect_contexts(results);

    assert_eq!(report.contexts.len(), 1);
    assert_eq!(report.contexts[0].topics.context, "orders");
    assert_eq!(report.failures.len(), 2);

    let failed: Vec<&str> = report.failures.iter().map(|f| f.context.as_str()).collect();
    assert_eq!(failed, vec!["audit", "billing"]);
    assert!(matches!(report.failures[0].error, SourceError::Validation(_)));
    assert!(matches!(report.failures[1].error, SourceError::Yaml { .. }));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn contexts_come_back_sorted() {
    let root = scratch_root("sorted");
    for context in ["zeta", "alpha", "mid"] {
        write_context(&root, context, "- name: t\n  producers: [p]\n");
    }

    let report = collect_contexts(DirectorySource::new(&root).fetch().unwrap());
    let names: Vec<&str> = report
        .contexts
        .iter()
        .map(|c| c.topics.context.as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    assert!(report.is_clean());

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn directories_without_topics_file_are_skipped() {
    let root = scratch_root("skip");
    write_context(&root, "real", "- name: t\n  consumers: [c]\n");
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join("README.md"), "not a context").unwrap();

    let results = DirectorySource::new(&root).fetch().unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_ok());

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn warnings_travel_with_the_context() {
    let root = scratch_root("warnings");
    write_context(&root, "ops", "- name: heartbeat\n- name: t\n  producers: [a, a]\n");

    let report = collect_contexts(DirectorySource::new(&root).fetch().unwrap());
    assert_eq!(report.contexts.len(), 1);
    assert_eq!(report.warnings().count(), 2);
    assert!(!report.is_clean());

    fs::remove_dir_all(&root).unwrap();
}
