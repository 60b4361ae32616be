//! Dataset loading from the export CSV.

use std::io::Read;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::record::{normalize_iso3, pad_ncm, TradeRecord};
use crate::source::DataSource;

/// Raw CSV row before normalization.
///
/// Every column is optional so that a missing cell drops or zeroes a value
/// instead of failing the row. Totals that are not numbers read as `None`.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "NCM")]
    ncm: Option<String>,
    #[serde(rename = "CO_PAIS")]
    co_pais: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    vl_fob_total: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    kg_liq_total: Option<f64>,
    #[serde(rename = "ISO3")]
    iso3: Option<String>,
}

/// The loaded trade records, kept for the lifetime of the viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<TradeRecord>,
}

impl Dataset {
    /// Wraps already-normalized records.
    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    /// Returns all records in file order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no records were loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses the export CSV from any reader.
///
/// Rows without an ISO3 code are discarded. A total that is not a number
/// counts as zero. Rows the reader cannot decode at all are skipped and
/// counted.
pub fn parse_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut without_country = 0usize;
    let mut malformed = 0usize;

    for (line, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                debug!("Skipping row {}: {}", line + 2, e);
                malformed += 1;
                continue;
            }
        };

        let iso3 = match row.iso3.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => normalize_iso3(code),
            _ => {
                without_country += 1;
                continue;
            }
        };

        records.push(TradeRecord {
            ncm: normalize_ncm(row.ncm.as_deref().unwrap_or_default()),
            origin_country: row.co_pais.unwrap_or_default(),
            fob_value: row.vl_fob_total.unwrap_or(0.0),
            net_weight_kg: row.kg_liq_total.unwrap_or(0.0),
            iso3,
        });
    }

    info!(
        "Parsed {} trade records ({} without country, {} malformed)",
        records.len(),
        without_country,
        malformed
    );

    Ok(Dataset { records })
}

/// Loads and parses the dataset from a file or URL.
pub async fn load_dataset(source: &DataSource) -> Result<Dataset> {
    info!("Loading trade dataset from {}", source);
    let bytes = source.fetch().await?;
    parse_dataset(bytes.as_slice())
}

/// Pads a product code, dropping a float suffix left by numeric exports.
fn normalize_ncm(raw: &str) -> String {
    let raw = raw.trim();
    let code = match raw.split_once('.') {
        Some((int, frac))
            if !int.is_empty()
                && int.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c == '0') =>
        {
            int
        }
        _ => raw,
    };
    pad_ncm(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{CollisionPolicy, GeoId, GeoIndex};
    use crate::lookup::CountryTable;
    use crate::record::Metric;

    const SAMPLE: &str = "\
NCM,CO_PAIS,vl_fob_total,kg_liq_total,ISO3
1012100,105,1500.5,300,bra
01012100,249,9000,1200,USA
2012100,249,10,1,
10011100,160,abc,5,CHN
10011100,160,42,,chn
";

    #[test]
    fn test_parse_normalizes_fields() {
        let dataset = parse_dataset(SAMPLE.as_bytes()).unwrap();
        let records = dataset.records();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].ncm, "01012100");
        assert_eq!(records[0].iso3, "BRA");
        assert_eq!(records[0].origin_country, "105");
        assert_eq!(records[0].fob_value, 1500.5);
        assert_eq!(records[1].ncm, "01012100");
        assert_eq!(records[1].iso3, "USA");
    }

    #[test]
    fn test_parse_drops_rows_without_country() {
        let dataset = parse_dataset(SAMPLE.as_bytes()).unwrap();
        assert!(dataset.records().iter().all(|r| !r.iso3.is_empty()));
        assert!(dataset.records().iter().all(|r| r.ncm != "02012100"));
    }

    #[test]
    fn test_parse_missing_number_is_zero() {
        let dataset = parse_dataset(SAMPLE.as_bytes()).unwrap();
        let chn = dataset.records().iter().rfind(|r| r.iso3 == "CHN").unwrap();
        assert_eq!(chn.fob_value, 42.0);
        assert_eq!(chn.net_weight_kg, 0.0);
    }

    #[test]
    fn test_parse_non_numeric_cell_keeps_row() {
        let dataset = parse_dataset(SAMPLE.as_bytes()).unwrap();
        let chn = dataset.records().iter().find(|r| r.iso3 == "CHN").unwrap();
        assert_eq!(chn.ncm, "10011100");
        assert_eq!(chn.fob_value, 0.0);
        assert_eq!(chn.net_weight_kg, 5.0);
    }

    #[test]
    fn test_non_numeric_row_takes_part_in_search() {
        let csv = "NCM,CO_PAIS,vl_fob_total,kg_liq_total,ISO3\n10011100,160,n/a,5,CHN\n";
        let dataset = parse_dataset(csv.as_bytes()).unwrap();
        let table = CountryTable::from_pairs([("CHN", 156)]);
        let index = GeoIndex::build(
            dataset.records(),
            "10011100",
            &table,
            CollisionPolicy::Overwrite,
        );
        assert_eq!(index.value(GeoId::new(156), Metric::NetWeight), Some(5.0));
        assert_eq!(index.value(GeoId::new(156), Metric::FobValue), Some(0.0));
    }

    #[test]
    fn test_parse_header_only() {
        let dataset = parse_dataset("NCM,CO_PAIS,vl_fob_total,kg_liq_total,ISO3\n".as_bytes())
            .unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_normalize_ncm_float_suffix() {
        assert_eq!(normalize_ncm("1012100.0"), "01012100");
        assert_eq!(normalize_ncm(" 8471 "), "00008471");
        assert_eq!(normalize_ncm("12.5"), "00012.5");
    }
}
