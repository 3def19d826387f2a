//! `topics.yaml` schema definitions.

use serde::{Deserialize, Serialize};

/// One topic record as written in a topics file.
///
/// Every field is optional here so that a record missing its name is caught
/// by validation with a useful message instead of failing the whole file in
/// the YAML deserializer. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_compaction: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumers: Option<Vec<String>>,
}

/// A topics file holds either a list of topics or a single topic mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopicsDoc {
    List(Vec<TopicDef>),
    Single(TopicDef),
}

impl TopicsDoc {
    pub fn into_defs(self) -> Vec<TopicDef> {
        match self {
            TopicsDoc::List(defs) => defs,
            TopicsDoc::Single(def) => vec![def],
        }
    }
}
