//! Main application state for the heat map viewer.
//!
//! Two values are edited by the user (the query and the metric) and two
//! arrive once from async loads (the dataset and the map shapes). The index
//! is replaced on every search; the scale, fills and legend are derived on
//! demand and never stored.

use heatmap_core::{
    fill_for, legend, pad_ncm, sanitize_query, CollisionPolicy, CountryTable, Dataset, GeoId,
    GeoIndex, Legend, MapShape, Metric, QuantizeScale,
};

/// Main application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search field contents, digits only.
    query: String,

    /// Metric driving colors and legend units.
    pub metric: Metric,

    /// How records sharing a region are combined.
    pub collision: CollisionPolicy,

    /// Trade records; `None` until the load finishes. A failed load stores an empty set.
    dataset: Option<Dataset>,

    /// Projected world regions; `None` until the load finishes. A failed load stores none.
    shapes: Option<Vec<MapShape>>,

    /// Index for the last search.
    index: GeoIndex,

    /// Padded NCM of the last non-empty search.
    pub searched_ncm: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Metric::default(), CollisionPolicy::default())
    }
}

impl AppState {
    /// Creates a new application state.
    pub fn new(metric: Metric, collision: CollisionPolicy) -> Self {
        Self {
            query: String::new(),
            metric,
            collision,
            dataset: None,
            shapes: None,
            index: GeoIndex::new(),
            searched_ncm: None,
        }
    }

    /// Returns the search field contents.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Updates the search field, keeping only digits.
    ///
    /// Returns `true` when characters were stripped, so the caller knows the
    /// input element no longer shows the stored query.
    pub fn set_query(&mut self, raw: &str) -> bool {
        self.query = sanitize_query(raw);
        self.query.len() != raw.len()
    }

    /// Selects a metric. The index is left untouched.
    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    /// Stores the loaded dataset.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
    }

    /// Stores the projected map shapes.
    pub fn set_shapes(&mut self, shapes: Vec<MapShape>) {
        self.shapes = Some(shapes);
    }

    /// Header text for the dataset slot.
    pub fn dataset_label(&self) -> String {
        match &self.dataset {
            None => "Loading dataset…".to_string(),
            Some(dataset) => format!("{} records", dataset.len()),
        }
    }

    /// Text drawn over the map while the geometry is still loading.
    pub fn map_overlay(&self) -> Option<&'static str> {
        self.shapes.is_none().then_some("Loading map…")
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn shapes(&self) -> Option<&[MapShape]> {
        self.shapes.as_deref()
    }

    pub fn index(&self) -> &GeoIndex {
        &self.index
    }

    /// Rebuilds the index for the current query using the embedded country table.
    pub fn search(&mut self) {
        self.search_with(CountryTable::embedded());
    }

    /// Rebuilds the index for the current query.
    ///
    /// Before the dataset arrives this produces an empty index.
    pub fn search_with(&mut self, table: &CountryTable) {
        let records = self.dataset.as_ref().map(Dataset::records).unwrap_or_default();
        self.index = GeoIndex::build(records, &self.query, table, self.collision);
        self.searched_ncm = (!self.query.is_empty()).then(|| pad_ncm(&self.query));
    }

    /// Color scale for the current index and metric.
    pub fn scale(&self) -> QuantizeScale {
        QuantizeScale::for_index(&self.index, self.metric)
    }

    /// Fill for a region under the current index, metric and scale.
    pub fn fill(&self, id: Option<GeoId>, scale: &QuantizeScale) -> &'static str {
        fill_for(id, &self.index, self.metric, scale)
    }

    /// Legend for the current search, hidden when nothing is indexed.
    pub fn legend(&self) -> Option<Legend> {
        legend(&self.index, self.metric, &self.scale())
    }
}

#[cfg(test)]
mod tests {
    use heatmap_core::{TradeRecord, FALLBACK_COLOR, PALETTE};

    use super::*;

    fn table() -> CountryTable {
        CountryTable::from_pairs([("BRA", 76), ("USA", 840)])
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Dataset::from_records(vec![
            TradeRecord::new("10011100", "105", 100.0, 700.0, "BRA"),
            TradeRecord::new("10011100", "249", 500.0, 7.0, "USA"),
        ]));
        state
    }

    #[test]
    fn test_query_keeps_only_digits() {
        let mut state = AppState::default();
        state.set_query("1001.11-00x");
        assert_eq!(state.query(), "10011100");
    }

    #[test]
    fn test_stripped_input_is_reported() {
        let mut state = AppState::default();
        assert!(!state.set_query("1001"));
        // typing a letter leaves the stored query unchanged
        assert!(state.set_query("1001a"));
        assert_eq!(state.query(), "1001");
        assert!(state.set_query("٣"));
        assert_eq!(state.query(), "");
        assert!(!state.set_query(""));
    }

    #[test]
    fn test_search_before_load_is_empty() {
        let mut state = AppState::default();
        state.set_query("10011100");
        state.search_with(&table());
        assert!(state.index().is_empty());
        assert!(state.legend().is_none());
    }

    #[test]
    fn test_search_builds_index() {
        let mut state = loaded_state();
        state.set_query("10011100");
        state.search_with(&table());

        assert_eq!(state.index().ids(), vec![GeoId::new(76), GeoId::new(840)]);
        assert_eq!(state.searched_ncm.as_deref(), Some("10011100"));
        assert_eq!(state.legend().unwrap().entries.len(), PALETTE.len());
    }

    #[test]
    fn test_typing_does_not_search() {
        let mut state = loaded_state();
        state.set_query("10011100");
        state.search_with(&table());
        state.set_query("999");
        assert_eq!(state.index().len(), 2);
    }

    #[test]
    fn test_new_search_replaces_index() {
        let mut state = loaded_state();
        state.set_query("10011100");
        state.search_with(&table());
        state.set_query("5");
        state.search_with(&table());

        assert!(state.index().is_empty());
        let scale = state.scale();
        assert_eq!(scale.max(), 1.0);
        assert_eq!(state.fill(Some(GeoId::new(76)), &scale), FALLBACK_COLOR);
    }

    #[test]
    fn test_metric_switch_recolors_existing_index() {
        let mut state = loaded_state();
        state.set_query("10011100");
        state.search_with(&table());

        let scale = state.scale();
        let fob_bra = state.fill(Some(GeoId::new(76)), &scale);

        state.set_metric(Metric::NetWeight);
        let scale = state.scale();
        let kg_bra = state.fill(Some(GeoId::new(76)), &scale);

        assert_eq!(scale.max(), 700.0);
        assert_ne!(fob_bra, kg_bra);
        assert_eq!(state.legend().unwrap().unit, "KG");
    }

    #[test]
    fn test_failed_loads_look_like_empty_loads() {
        let mut state = AppState::default();
        assert_eq!(state.dataset_label(), "Loading dataset…");
        assert_eq!(state.map_overlay(), Some("Loading map…"));

        // what the root component stores when a load fails
        state.set_dataset(Dataset::default());
        state.set_shapes(Vec::new());

        assert_eq!(state.dataset_label(), "0 records");
        assert_eq!(state.map_overlay(), None);

        let mut empty = AppState::default();
        empty.set_dataset(Dataset::from_records(Vec::new()));
        empty.set_shapes(Vec::new());
        assert_eq!(state.dataset_label(), empty.dataset_label());
        assert_eq!(state.map_overlay(), empty.map_overlay());
    }
}
