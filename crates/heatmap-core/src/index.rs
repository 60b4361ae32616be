//! Geometry-id index for a searched product code.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::lookup::CountryTable;
use crate::record::{pad_ncm, sanitize_query, Metric, TradeRecord};

/// Numeric identifier of a map region.
///
/// Ids compare numerically, so `"076"` in the geometry and `76` in the
/// lookup table name the same region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeoId(u32);

impl GeoId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Parses a numeric id, tolerating leading zeros and whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<u32>().ok().map(Self)
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do when two matching records land on the same region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// The last record in file order replaces earlier ones.
    #[default]
    Overwrite,
    /// Both totals are summed; identifying fields come from the last record.
    Sum,
}

/// Mapping from region id to the record matching the current search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoIndex {
    entries: BTreeMap<GeoId, TradeRecord>,
}

impl GeoIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh index for `query` over `records`.
    ///
    /// The query is sanitized and zero-padded before an exact comparison
    /// against each record's product code. An empty query matches nothing.
    /// Records whose country is missing from `table` are dropped.
    pub fn build(
        records: &[TradeRecord],
        query: &str,
        table: &CountryTable,
        policy: CollisionPolicy,
    ) -> Self {
        let digits = sanitize_query(query);
        if digits.is_empty() {
            return Self::new();
        }
        let ncm = pad_ncm(&digits);

        let mut index = Self::new();
        let mut matched = 0usize;

        for record in records.iter().filter(|r| r.ncm == ncm) {
            matched += 1;
            match table.geo_id(&record.iso3) {
                Some(id) => index.insert(id, record, policy),
                None => debug!("No region for country {} (NCM {})", record.iso3, ncm),
            }
        }

        info!(
            "Search NCM {}: {} matching records, {} regions",
            ncm,
            matched,
            index.len()
        );

        index
    }

    fn insert(&mut self, id: GeoId, record: &TradeRecord, policy: CollisionPolicy) {
        match (self.entries.entry(id), policy) {
            (Entry::Occupied(mut slot), CollisionPolicy::Sum) => {
                let existing = slot.get();
                let merged = TradeRecord {
                    fob_value: existing.fob_value + record.fob_value,
                    net_weight_kg: existing.net_weight_kg + record.net_weight_kg,
                    ..record.clone()
                };
                slot.insert(merged);
            }
            (Entry::Occupied(mut slot), CollisionPolicy::Overwrite) => {
                slot.insert(record.clone());
            }
            (Entry::Vacant(slot), _) => {
                slot.insert(record.clone());
            }
        }
    }

    /// Returns the record indexed for a region.
    pub fn get(&self, id: GeoId) -> Option<&TradeRecord> {
        self.entries.get(&id)
    }

    /// Returns the metric value for a region, if indexed.
    pub fn value(&self, id: GeoId, metric: Metric) -> Option<f64> {
        self.get(id).map(|r| r.value(metric))
    }

    /// Returns the largest metric value across indexed records.
    pub fn max_value(&self, metric: Metric) -> Option<f64> {
        self.entries
            .values()
            .map(|r| r.value(metric))
            .filter(|v| !v.is_nan())
            .fold(None, |max, v| match max {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }

    /// Iterates entries in ascending region id order.
    pub fn iter(&self) -> impl Iterator<Item = (GeoId, &TradeRecord)> {
        self.entries.iter().map(|(id, r)| (*id, r))
    }

    /// Returns the indexed region ids.
    pub fn ids(&self) -> Vec<GeoId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CountryTable {
        CountryTable::from_pairs([("BRA", 76), ("USA", 840), ("ARG", 32)])
    }

    fn records() -> Vec<TradeRecord> {
        vec![
            TradeRecord::new("1234", "105", 100.0, 10.0, "BRA"),
            TradeRecord::new("00001234", "249", 500.0, 5.0, "USA"),
            TradeRecord::new("99999999", "063", 900.0, 90.0, "ARG"),
            TradeRecord::new("1234", "999", 700.0, 70.0, "ATL"),
        ]
    }

    #[test]
    fn test_build_exact_match() {
        let index = GeoIndex::build(&records(), "1234", &table(), CollisionPolicy::Overwrite);

        assert_eq!(index.ids(), vec![GeoId::new(76), GeoId::new(840)]);
        assert_eq!(index.get(GeoId::new(76)).unwrap().fob_value, 100.0);
        assert_eq!(index.get(GeoId::new(840)).unwrap().fob_value, 500.0);
        assert!(index.get(GeoId::new(32)).is_none());
    }

    #[test]
    fn test_padded_and_short_queries_agree() {
        let short = GeoIndex::build(&records(), "1234", &table(), CollisionPolicy::Overwrite);
        let padded = GeoIndex::build(&records(), "00001234", &table(), CollisionPolicy::Overwrite);
        assert_eq!(short, padded);
    }

    #[test]
    fn test_no_prefix_match() {
        let index = GeoIndex::build(&records(), "123", &table(), CollisionPolicy::Overwrite);
        assert!(index.is_empty());
    }

    #[test]
    fn test_empty_query_is_empty_index() {
        let index = GeoIndex::build(&records(), "", &table(), CollisionPolicy::Overwrite);
        assert!(index.is_empty());
        let index = GeoIndex::build(&records(), "abc", &table(), CollisionPolicy::Overwrite);
        assert!(index.is_empty());
    }

    #[test]
    fn test_overwrite_last_wins() {
        let mut data = records();
        data.push(TradeRecord::new("1234", "105", 40.0, 4.0, "bra"));

        let index = GeoIndex::build(&data, "1234", &table(), CollisionPolicy::Overwrite);
        let bra = index.get(GeoId::new(76)).unwrap();
        assert_eq!(bra.fob_value, 40.0);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_sum_aggregates_totals() {
        let mut data = records();
        data.push(TradeRecord::new("1234", "106", 40.0, 4.0, "BRA"));

        let index = GeoIndex::build(&data, "1234", &table(), CollisionPolicy::Sum);
        let bra = index.get(GeoId::new(76)).unwrap();
        assert_eq!(bra.fob_value, 140.0);
        assert_eq!(bra.net_weight_kg, 14.0);
        assert_eq!(bra.origin_country, "106");
    }

    #[test]
    fn test_max_value_per_metric() {
        let index = GeoIndex::build(&records(), "1234", &table(), CollisionPolicy::Overwrite);
        assert_eq!(index.max_value(Metric::FobValue), Some(500.0));
        assert_eq!(index.max_value(Metric::NetWeight), Some(10.0));
        assert_eq!(GeoIndex::new().max_value(Metric::FobValue), None);
    }

    #[test]
    fn test_geo_id_parse() {
        assert_eq!(GeoId::parse("076"), Some(GeoId::new(76)));
        assert_eq!(GeoId::parse(" 840 "), Some(GeoId::new(840)));
        assert_eq!(GeoId::parse("-99"), None);
        assert_eq!(GeoId::new(4).to_string(), "4");
    }
}
