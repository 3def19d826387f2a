//! Validated input records handed to the graph builder.

/// Partition count assumed when a topic declares none.
pub const DEFAULT_PARTITIONS: u32 = 1;

/// A message topic as declared in a context's topics file.
///
/// The builder trusts this record: names are non-empty, `partitions >= 1`.
/// Checking that is the job of whatever produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub partitions: u32,
    pub log_compaction: bool,
    pub producers: Vec<String>,
    pub consumers: Vec<String>,
}

impl Topic {
    /// A topic with one partition, no compaction and no producers/consumers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partitions: DEFAULT_PARTITIONS,
            log_compaction: false,
            producers: Vec::new(),
            consumers: Vec::new(),
        }
    }

    pub fn with_partitions(mut self, partitions: u32) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn with_log_compaction(mut self, log_compaction: bool) -> Self {
        self.log_compaction = log_compaction;
        self
    }

    pub fn with_producers<I, S>(mut self, producers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.producers = producers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_consumers<I, S>(mut self, consumers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumers = consumers.into_iter().map(Into::into).collect();
        self
    }

    /// Every service named by this topic, producers first, in declaration order.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.producers
            .iter()
            .chain(self.consumers.iter())
            .map(String::as_str)
    }
}

/// The topics declared by one bounded context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextTopics {
    pub context: String,
    pub topics: Vec<Topic>,
}

impl ContextTopics {
    pub fn new(context: impl Into<String>, topics: Vec<Topic>) -> Self {
        Self {
            context: context.into(),
            topics,
        }
    }

    /// Distinct service names referenced by this context, first-seen order.
    pub fn service_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.topics
            .iter()
            .flat_map(Topic::services)
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_defaults() {
        let topic = Topic::new("orders");
        assert_eq!(topic.partitions, 1);
        assert!(!topic.log_compaction);
        assert!(topic.producers.is_empty());
        assert!(topic.consumers.is_empty());
    }

    #[test]
    fn service_names_are_distinct_and_ordered() {
        let ctx = ContextTopics::new(
            "shop",
            vec![
                Topic::new("a")
                    .with_producers(["x", "y"])
                    .with_consumers(["z"]),
                Topic::new("b").with_producers(["z"]).with_consumers(["x", "w"]),
            ],
        );
        assert_eq!(ctx.service_names(), vec!["x", "y", "z", "w"]);
    }
}
