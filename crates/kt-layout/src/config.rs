//! Layout parameters.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Spacing, node size and palette used by the layered layout.
///
/// Every field has a default, so a config file only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between the producer, topic and consumer columns.
    pub column_spacing: f32,
    /// Vertical distance between rows within a column.
    pub row_spacing: f32,
    /// `y` of the first row.
    pub start_y: f32,
    pub node_width: f32,
    pub node_height: f32,
    /// Colors handed out to contexts in first-seen order, wrapping around.
    pub context_palette: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: 350.0,
            row_spacing: 80.0,
            start_y: 50.0,
            node_width: 200.0,
            node_height: 50.0,
            context_palette: default_palette(),
        }
    }
}

fn default_palette() -> Vec<String> {
    [
        "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC948", "#B07AA1", "#FF9DA7",
        "#9C755F", "#BAB0AC", "#1F77B4", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#17BECF",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl LayoutConfig {
    /// Reject spacings that would stack nodes on top of each other or
    /// produce non-finite coordinates.
    pub fn validate(&self) -> LayoutResult<()> {
        positive("column_spacing", self.column_spacing)?;
        positive("row_spacing", self.row_spacing)?;
        positive("node_width", self.node_width)?;
        positive("node_height", self.node_height)?;
        if !self.start_y.is_finite() {
            return Err(LayoutError::InvalidConfig {
                field: "start_y",
                value: self.start_y.to_string(),
                reason: "must be finite",
            });
        }
        if self.context_palette.is_empty() {
            return Err(LayoutError::InvalidConfig {
                field: "context_palette",
                value: "[]".to_string(),
                reason: "must hold at least one color",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> LayoutResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfig {
            field,
            value: value.to_string(),
            reason: "must be positive and finite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = LayoutConfig::default();
        config.validate().unwrap();
        assert_eq!(config.column_spacing, 350.0);
        assert_eq!(config.row_spacing, 80.0);
        assert_eq!(config.start_y, 50.0);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: LayoutConfig = serde_yaml::from_str("row_spacing: 120\n").unwrap();
        assert_eq!(config.row_spacing, 120.0);
        assert_eq!(config.column_spacing, 350.0);
        assert!(!config.context_palette.is_empty());
    }

    #[test]
    fn rejects_zero_spacing() {
        let config = LayoutConfig {
            column_spacing: 0.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig {
                field: "column_spacing",
                ..
            })
        ));
    }

    #[test]
    fn rejects_empty_palette() {
        let config = LayoutConfig {
            context_palette: Vec::new(),
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
