use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::filter::{FilterSet, apply, filtered_indices};
use crate::data::labels;
use crate::data::model::{Dataset, Dimension, DimensionValue, Record};
use crate::data::snapshot::Snapshot;

// ---------------------------------------------------------------------------
// Pages and events
// ---------------------------------------------------------------------------

/// The two pages of the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Metric cards plus every chart.
    #[default]
    Home,
    /// Charts only.
    Charts,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Home, Page::Charts];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::Charts => "📊 Charts",
        }
    }
}

/// A filter change requested by the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    Toggle(Dimension, DimensionValue),
    SelectAll(Dimension),
    SelectNone(Dimension),
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct DashboardState {
    /// Loaded once at startup, never mutated.
    pub dataset: Dataset,

    /// Current sidebar selection.
    pub filters: FilterSet,

    /// Indices of records passing `filters`.
    pub visible_indices: Vec<usize>,

    /// Derived values for the visible records.
    pub snapshot: Snapshot,

    /// Company → series colour.
    pub company_colors: ColorMap,

    /// Product type → donut slice colour.
    pub product_colors: ColorMap,

    pub page: Page,

    /// Show product types through the label table.
    pub translate_labels: bool,

    /// Where the dataset came from (shown in the top bar).
    pub source: String,
}

impl DashboardState {
    /// Start with every value selected.
    pub fn new(dataset: Dataset, config: &AppConfig) -> Self {
        let filters = FilterSet::all(&dataset);
        let company_colors = ColorMap::new(&dataset.distinct(Dimension::Company));
        let product_colors = ColorMap::new(&dataset.distinct(Dimension::ProductType));
        let mut state = Self {
            dataset,
            filters,
            visible_indices: Vec::new(),
            snapshot: Snapshot::default(),
            company_colors,
            product_colors,
            page: Page::default(),
            translate_labels: config.translate_labels,
            source: config.data_path.display().to_string(),
        };
        state.recompute();
        state
    }

    /// Apply a batch of sidebar events. Recomputes at most once, and only
    /// when the selection actually changed.
    pub fn apply(&mut self, events: impl IntoIterator<Item = FilterEvent>) {
        let before = self.filters.clone();
        for event in events {
            match event {
                FilterEvent::Toggle(dim, value) => self.filters.toggle(&self.dataset, dim, &value),
                FilterEvent::SelectAll(dim) => self.filters.select_all(&self.dataset, dim),
                FilterEvent::SelectNone(dim) => self.filters.select_none(dim),
            }
        }
        if self.filters != before {
            self.recompute();
        }
    }

    /// Rebuild the filtered view and its snapshot from scratch.
    pub fn recompute(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset.records, &self.filters);
        let view = apply(&self.dataset.records, &self.filters);
        self.snapshot = Snapshot::compute(&view);
        log::debug!(
            "Recomputed view: {} of {} records visible",
            self.visible_indices.len(),
            self.dataset.len()
        );
    }

    /// The visible records in original order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        self.visible_indices.iter().map(|&i| &self.dataset.records[i])
    }

    /// Text for a dimension value as the sidebar and charts show it.
    pub fn display_value(&self, dimension: Dimension, value: &DimensionValue) -> String {
        match (dimension, value) {
            (Dimension::ProductType, DimensionValue::Text(code)) => {
                labels::display(code, self.translate_labels).to_string()
            }
            _ => value.to_string(),
        }
    }
}
