//! Detail panel: a pure view of the selection store.
//!
//! [`DetailPanel::render`] maps the current selection to a [`PanelView`]
//! without side effects. Statuses outside the known set fall back to a
//! neutral badge rather than failing.

use std::fmt;

use crate::catalog::{InspectionRecord, Status};
use crate::options::{BadgeStyle, PaletteOptions};
use crate::selection::SelectionStore;

/// Shown while nothing is selected.
pub const EMPTY_PROMPT: &str =
    "Select a part on the 3D model to see its detailed report.";

/// Overlay hint for the 3D view while nothing is selected.
pub const SELECT_HINT: &str = "Tap a part of the model to see details";

/// Semantic color family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    /// Red family.
    Critical,
    /// Amber family.
    Warning,
    /// Green family.
    Healthy,
    /// Neutral fallback for unknown statuses.
    Neutral,
}

/// Status badge as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    /// Badge text.
    pub label: String,
    /// Color family.
    pub tone: BadgeTone,
    /// RGB color from the palette.
    pub color: [f32; 3],
}

/// Fields of the selected record, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    /// Record title, verbatim.
    pub title: String,
    /// Location label, verbatim.
    pub location: Option<String>,
    /// Status badge.
    pub badge: Badge,
    /// Anomaly count, verbatim.
    pub anomaly_count: u32,
    /// Findings, verbatim.
    pub description: String,
    /// Last scan text, verbatim.
    pub last_scan: String,
}

/// What the detail panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    /// Nothing selected.
    Empty {
        /// Prompt inviting a selection.
        prompt: &'static str,
    },
    /// A record is selected.
    Record(RecordView),
}

/// Renders the selection into a [`PanelView`] using a badge palette.
#[derive(Debug, Clone, Default)]
pub struct DetailPanel {
    palette: PaletteOptions,
}

impl DetailPanel {
    /// Panel using `palette` for status badges.
    #[must_use]
    pub fn new(palette: PaletteOptions) -> Self {
        Self { palette }
    }

    /// View of whatever `store` currently holds.
    #[must_use]
    pub fn render(&self, store: &SelectionStore) -> PanelView {
        store.current().map_or(
            PanelView::Empty {
                prompt: EMPTY_PROMPT,
            },
            |record| PanelView::Record(self.record_view(record)),
        )
    }

    fn record_view(&self, record: &InspectionRecord) -> RecordView {
        RecordView {
            title: record.title.clone(),
            location: record.location.clone(),
            badge: self.badge_for(&record.status),
            anomaly_count: record.anomaly_count,
            description: record.description.clone(),
            last_scan: record.last_scan.clone(),
        }
    }

    /// Badge for a status; anything outside the known set is neutral.
    #[must_use]
    pub fn badge_for(&self, status: &Status) -> Badge {
        let (style, tone) = match status {
            Status::Critical => (&self.palette.critical, BadgeTone::Critical),
            Status::Warning => (&self.palette.warning, BadgeTone::Warning),
            Status::Healthy => (&self.palette.healthy, BadgeTone::Healthy),
            Status::Other(value) => {
                log::warn!("no badge for status {value:?}, using fallback");
                (&self.palette.fallback, BadgeTone::Neutral)
            }
        };
        badge(style, tone)
    }
}

fn badge(style: &BadgeStyle, tone: BadgeTone) -> Badge {
    Badge {
        label: style.label.clone(),
        tone,
        color: style.color,
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { prompt } => write!(f, "{prompt}"),
            Self::Record(view) => {
                writeln!(f, "{}  [{}]", view.title, view.badge.label)?;
                if let Some(location) = &view.location {
                    writeln!(f, "Location: {location}")?;
                }
                writeln!(f, "Anomalies: {}", view.anomaly_count)?;
                writeln!(f, "Findings: {}", view.description)?;
                write!(f, "Last scan: {}", view.last_scan)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn panel() -> DetailPanel {
        DetailPanel::new(PaletteOptions::default())
    }

    fn selected(id: &str) -> SelectionStore {
        let mut store = SelectionStore::new();
        store.select(Catalog::builtin().unwrap().find(id).unwrap().clone());
        store
    }

    #[test]
    fn empty_store_shows_prompt() {
        let view = panel().render(&SelectionStore::new());
        assert_eq!(
            view,
            PanelView::Empty {
                prompt: EMPTY_PROMPT
            }
        );
        assert_eq!(view.to_string(), EMPTY_PROMPT);
    }

    #[test]
    fn record_fields_are_verbatim() {
        let store = selected("aspa1");
        let record = store.current().unwrap();
        let PanelView::Record(view) = panel().render(&store) else {
            panic!("expected a record view");
        };
        assert_eq!(view.title, record.title);
        assert_eq!(view.location, record.location);
        assert_eq!(view.description, record.description);
        assert_eq!(view.last_scan, record.last_scan);
        assert_eq!(view.anomaly_count, 3);
        assert_eq!(view.badge.label, "Critical");
        assert_eq!(view.badge.tone, BadgeTone::Critical);
    }

    #[test]
    fn known_statuses_map_to_their_tones() {
        let panel = panel();
        let palette = PaletteOptions::default();
        let warning = panel.badge_for(&Status::Warning);
        assert_eq!(warning.tone, BadgeTone::Warning);
        assert_eq!(warning.color, palette.warning.color);
        assert_eq!(panel.badge_for(&Status::Healthy).label, "Healthy");
    }

    #[test]
    fn unknown_status_falls_back_to_neutral() {
        let badge = panel().badge_for(&Status::from("unknown"));
        assert_eq!(badge.tone, BadgeTone::Neutral);
        assert_eq!(badge.label, PaletteOptions::default().fallback.label);
    }

    #[test]
    fn shipped_records_never_need_the_fallback() {
        let panel = panel();
        for record in Catalog::builtin().unwrap().iter() {
            assert_ne!(panel.badge_for(&record.status).tone, BadgeTone::Neutral);
        }
    }

    #[test]
    fn text_rendering_includes_badge_and_findings() {
        let text = panel().render(&selected("aspa3")).to_string();
        assert!(text.contains("[Warning]"));
        assert!(text.contains("Anomalies: 1"));
        assert!(text.contains("Last scan: "));
    }

    #[test]
    fn custom_palette_labels_are_used() {
        let mut palette = PaletteOptions::default();
        palette.critical.label = "Crítico".to_owned();
        let badge = DetailPanel::new(palette).badge_for(&Status::Critical);
        assert_eq!(badge.label, "Crítico");
    }
}
