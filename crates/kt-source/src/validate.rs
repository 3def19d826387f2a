//! Topic record validation.
//!
//! Turns raw `TopicDef`s into the `Topic` records the graph builder trusts.

use std::collections::HashSet;
use std::fmt;

use kt_graph::{ContextTopics, DEFAULT_PARTITIONS, Topic};

use crate::schema::TopicDef;

/// A topic record that can't be turned into a `Topic`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Topic #{index} in context '{context}' has no name")]
    MissingName { context: String, index: usize },

    #[error("Topic '{topic}' in context '{context}': partitions = {value} (must be at least 1)")]
    InvalidPartitions {
        context: String,
        topic: String,
        value: i64,
    },

    #[error("Duplicate topic '{topic}' in context '{context}'")]
    DuplicateTopic { context: String, topic: String },

    #[error("Service '{name}' in context '{context}' has the same name as a topic")]
    ServiceTopicNameClash { context: String, name: String },

    #[error("Topic '{topic}' in context '{context}' lists an empty {role} name")]
    EmptyService {
        context: String,
        topic: String,
        role: &'static str,
    },
}

/// Something suspicious that doesn't stop the context from loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The same service listed twice in one topic's producers or consumers.
    /// The graph keeps a single edge for it.
    DuplicateService {
        context: String,
        topic: String,
        service: String,
        role: &'static str,
    },
    /// A topic nobody produces to or consumes from.
    Unconnected { context: String, topic: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::DuplicateService {
                context,
                topic,
                service,
                role,
            } => write!(
                f,
                "Topic '{topic}' in context '{context}' lists {role} '{service}' more than once"
            ),
            ValidationWarning::Unconnected { context, topic } => write!(
                f,
                "Topic '{topic}' in context '{context}' has no producers or consumers"
            ),
        }
    }
}

/// A context whose topics passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub topics: ContextTopics,
    pub warnings: Vec<ValidationWarning>,
}

/// Validate every record of a context, stopping at the first error.
pub fn validate_topics(context: &str, defs: Vec<TopicDef>) -> Result<Validated, ValidationError> {
    let mut names = HashSet::new();
    let mut topics = Vec::with_capacity(defs.len());
    let mut warnings = Vec::new();

    for (index, def) in defs.into_iter().enumerate() {
        let topic = validate_topic(context, index, def, &mut warnings)?;
        if !names.insert(topic.name.clone()) {
            return Err(ValidationError::DuplicateTopic {
                context: context.to_string(),
                topic: topic.name,
            });
        }
        topics.push(topic);
    }

    // Services and topics of one context share an id space.
    if let Some(name) = topics
        .iter()
        .flat_map(|topic| topic.services())
        .find(|service| names.contains(*service))
    {
        return Err(ValidationError::ServiceTopicNameClash {
            context: context.to_string(),
            name: name.to_string(),
        });
    }

    Ok(Validated {
        topics: ContextTopics::new(context, topics),
        warnings,
    })
}

fn validate_topic(
    context: &str,
    index: usize,
    def: TopicDef,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<Topic, ValidationError> {
    let name = match def.name.map(|n| n.trim().to_string()) {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(ValidationError::MissingName {
                context: context.to_string(),
                index,
            });
        }
    };

    let partitions = match def.partitions {
        None => DEFAULT_PARTITIONS,
        Some(value) => u32::try_from(value)
            .ok()
            .filter(|&p| p >= 1)
            .ok_or_else(|| ValidationError::InvalidPartitions {
                context: context.to_string(),
                topic: name.clone(),
                value,
            })?,
    };

    let producers = def.producers.unwrap_or_default();
    let consumers = def.consumers.unwrap_or_default();
    check_services(context, &name, "producer", &producers, warnings)?;
    check_services(context, &name, "consumer", &consumers, warnings)?;

    if producers.is_empty() && consumers.is_empty() {
        warnings.push(ValidationWarning::Unconnected {
            context: context.to_string(),
            topic: name.clone(),
        });
    }

    Ok(Topic {
        name,
        partitions,
        log_compaction: def.log_compaction.unwrap_or(false),
        producers,
        consumers,
    })
}

fn check_services(
    context: &str,
    topic: &str,
    role: &'static str,
    services: &[String],
    warnings: &mut Vec<ValidationWarning>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for service in services {
        if service.trim().is_empty() {
            return Err(ValidationError::EmptyService {
                context: context.to_string(),
                topic: topic.to_string(),
                role,
            });
        }
        if !seen.insert(service.as_str()) {
            warnings.push(ValidationWarning::DuplicateService {
                context: context.to_string(),
                topic: topic.to_string(),
                service: service.clone(),
                role,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str) -> TopicDef {
        TopicDef {
            name: Some(name.to_string()),
            producers: Some(vec!["svc".to_string()]),
            ..TopicDef::default()
        }
    }

    #[test]
    fn applies_defaults() {
        let validated = validate_topics("ctx", vec![def("orders")]).unwrap();
        let topic = &validated.topics.topics[0];
        assert_eq!(topic.partitions, 1);
        assert!(!topic.log_compaction);
        assert!(topic.consumers.is_empty());
        assert!(validated.warnings.is_empty());
        assert_eq!(validated.topics.context, "ctx");
    }

    #[test]
    fn missing_name_is_an_error() {
        let err = validate_topics("ctx", vec![def("ok"), TopicDef::default()]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingName {
                context: "ctx".into(),
                index: 1
            }
        );
    }

    #[test]
    fn blank_name_is_an_error() {
        let err = validate_topics("ctx", vec![def("  ")]).unwrap_err();
        assert!(matches!(err, ValidationError::MissingName { .. }));
    }

    #[test]
    fn zero_partitions_is_an_error() {
        let mut bad = def("t");
        bad.partitions = Some(0);
        assert!(matches!(
            validate_topics("ctx", vec![bad]),
            Err(ValidationError::InvalidPartitions { value: 0, .. })
        ));
    }

    #[test]
    fn duplicate_topic_is_an_error() {
        let err = validate_topics("ctx", vec![def("t"), def("t")]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateTopic { .. }));
    }

    #[test]
    fn empty_service_is_an_error() {
        let mut bad = def("t");
        bad.consumers = Some(vec!["".into()]);
        assert!(matches!(
            validate_topics("ctx", vec![bad]),
            Err(ValidationError::EmptyService {
                role: "consumer",
                ..
            })
        ));
    }

    #[test]
    fn service_named_like_a_topic_is_an_error() {
        let mut audit = def("audit");
        audit.producers = Some(vec!["audit".into()]);
        assert_eq!(
            validate_topics("ops", vec![audit]).unwrap_err(),
            ValidationError::ServiceTopicNameClash {
                context: "ops".into(),
                name: "audit".into(),
            }
        );
    }

    #[test]
    fn service_clashing_with_a_later_topic_is_an_error() {
        let mut first = def("orders");
        first.consumers = Some(vec!["invoices".into()]);
        let err = validate_topics("shop", vec![first, def("invoices")]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ServiceTopicNameClash { ref name, .. } if name == "invoices"
        ));
    }

    #[test]
    fn duplicate_service_is_a_warning() {
        let mut dup = def("t");
        dup.producers = Some(vec!["a".into(), "a".into()]);
        let validated = validate_topics("ctx", vec![dup]).unwrap();
        assert_eq!(validated.warnings.len(), 1);
        assert!(validated.warnings[0].to_string().contains("more than once"));
        // The record itself is kept as written.
        assert_eq!(validated.topics.topics[0].producers.len(), 2);
    }

    #[test]
    fn unconnected_topic_is_a_warning() {
        let lonely = TopicDef {
            name: Some("lonely".into()),
            ..TopicDef::default()
        };
        let validated = validate_topics("ctx", vec![lonely]).unwrap();
        assert!(matches!(
            validated.warnings.as_slice(),
            [ValidationWarning::Unconnected { .. }]
        ));
    }
}
