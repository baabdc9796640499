use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Label and RGB color of one status badge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct BadgeStyle {
    /// Text shown in the badge.
    pub label: String,
    /// Badge RGB color.
    pub color: [f32; 3],
}

impl BadgeStyle {
    fn new(label: &str, color: [f32; 3]) -> Self {
        Self {
            label: label.to_owned(),
            color,
        }
    }
}

/// Status badge palette for the detail panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Palette", inline)]
#[serde(default)]
pub struct PaletteOptions {
    /// Badge for `critical` records.
    pub critical: BadgeStyle,
    /// Badge for `warning` records.
    pub warning: BadgeStyle,
    /// Badge for `healthy` records.
    pub healthy: BadgeStyle,
    /// Badge for any status outside the known set.
    pub fallback: BadgeStyle,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            critical: BadgeStyle::new("Critical", [0.94, 0.27, 0.27]),
            warning: BadgeStyle::new("Warning", [0.96, 0.62, 0.04]),
            healthy: BadgeStyle::new("Healthy", [0.06, 0.73, 0.51]),
            fallback: BadgeStyle::new("Unknown", [0.58, 0.64, 0.72]),
        }
    }
}
