use core::borrow::Borrow;
use core::fmt;

/// Separator between a context name and an entity name in namespaced ids.
pub const CONTEXT_SEPARATOR: char = ':';

const PRODUCE_PREFIX: &str = "produce:";
const CONSUME_PREFIX: &str = "consume:";
const ARROW: &str = "->";

/// Identifier of a topic or service node, unique across a whole graph.
///
/// In flat mode this is the bare entity name; in namespaced mode it is
/// `<context>:<name>`. Build one with [`Namespace::node_id`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct NodeId(String);

/// Identifier of a produce/consume edge.
///
/// Derived only from the edge role and its endpoints, so rebuilding the same
/// input always yields the same ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EdgeId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            /// Wrap an already formatted id string.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($ty), self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(NodeId);
string_id!(EdgeId);

/// Id namespace of a single context.
///
/// A flat namespace adds no prefix; a context namespace prefixes every id
/// with `<context>:`. An empty context name is always flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace<'a> {
    context: Option<&'a str>,
}

impl<'a> Namespace<'a> {
    pub fn flat() -> Self {
        Self { context: None }
    }

    pub fn context(name: &'a str) -> Self {
        if name.is_empty() {
            Self::flat()
        } else {
            Self {
                context: Some(name),
            }
        }
    }

    pub fn is_flat(&self) -> bool {
        self.context.is_none()
    }

    /// The literal prefix prepended to entity names (`""` or `"<context>:"`).
    pub fn prefix(&self) -> String {
        match self.context {
            Some(ctx) => format!("{ctx}{CONTEXT_SEPARATOR}"),
            None => String::new(),
        }
    }

    pub fn node_id(&self, name: &str) -> NodeId {
        match self.context {
            Some(ctx) => NodeId(format!("{ctx}{CONTEXT_SEPARATOR}{name}")),
            None => NodeId(name.to_string()),
        }
    }
}

/// `produce:<serviceId>-><topicId>`
pub fn produce_edge_id(service: &NodeId, topic: &NodeId) -> EdgeId {
    EdgeId(format!("{PRODUCE_PREFIX}{service}{ARROW}{topic}"))
}

/// `consume:<topicId>-><serviceId>`
pub fn consume_edge_id(topic: &NodeId, service: &NodeId) -> EdgeId {
    EdgeId(format!("{CONSUME_PREFIX}{topic}{ARROW}{service}"))
}
