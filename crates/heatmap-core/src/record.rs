//! Trade records and the metric selected for coloring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HeatmapError;

/// Width every stored product code is zero-padded to.
pub const NCM_WIDTH: usize = 8;

/// One row of the export dataset, already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Product code, always `NCM_WIDTH` characters, zero-padded on the left.
    pub ncm: String,
    /// Origin country code as it appears in the source.
    pub origin_country: String,
    /// Monetary total (FOB value, R$).
    pub fob_value: f64,
    /// Net weight total in kilograms.
    pub net_weight_kg: f64,
    /// ISO3 country code, always upper-case.
    pub iso3: String,
}

impl TradeRecord {
    /// Creates a record, applying the same normalization as the loader.
    pub fn new(
        ncm: impl AsRef<str>,
        origin_country: impl Into<String>,
        fob_value: f64,
        net_weight_kg: f64,
        iso3: impl AsRef<str>,
    ) -> Self {
        Self {
            ncm: pad_ncm(ncm.as_ref().trim()),
            origin_country: origin_country.into(),
            fob_value,
            net_weight_kg,
            iso3: normalize_iso3(iso3.as_ref()),
        }
    }

    /// Returns the value of the given metric for this record.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::FobValue => self.fob_value,
            Metric::NetWeight => self.net_weight_kg,
        }
    }
}

/// Which record total drives coloring and the legend unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// FOB value (`VL_FOB`).
    #[default]
    #[serde(rename = "VL_FOB")]
    FobValue,
    /// Net weight (`KG_LIQUIDO`).
    #[serde(rename = "KG_LIQUIDO")]
    NetWeight,
}

impl Metric {
    /// Both metrics, in display order.
    pub const ALL: [Metric; 2] = [Metric::FobValue, Metric::NetWeight];

    /// Returns the code shown on the toggle.
    pub fn code(&self) -> &'static str {
        match self {
            Metric::FobValue => "VL_FOB",
            Metric::NetWeight => "KG_LIQUIDO",
        }
    }

    /// Returns the unit shown in the legend title.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::FobValue => "R$",
            Metric::NetWeight => "KG",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Metric {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VL_FOB" | "FOB" => Ok(Metric::FobValue),
            "KG_LIQUIDO" | "KG" => Ok(Metric::NetWeight),
            _ => Err(HeatmapError::UnknownMetric(s.to_string())),
        }
    }
}

/// Strips everything but ASCII digits from user input.
pub fn sanitize_query(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Left-pads a product code with zeros to `NCM_WIDTH`. Longer codes are kept as-is.
pub fn pad_ncm(code: &str) -> String {
    format!("{:0>width$}", code, width = NCM_WIDTH)
}

/// Upper-cases a country code.
pub fn normalize_iso3(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_only_digits() {
        assert_eq!(sanitize_query("10.01-11 00"), "10011100");
        assert_eq!(sanitize_query("abc"), "");
        assert_eq!(sanitize_query(""), "");
        assert_eq!(sanitize_query("٣12"), "12");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["", "1234", "x1y2z3", "  0101 ", "ncm: 8471.30.12"] {
            let once = sanitize_query(input);
            assert!(once.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(sanitize_query(&once), once);
        }
    }

    #[test]
    fn test_pad_ncm() {
        assert_eq!(pad_ncm("1234"), "00001234");
        assert_eq!(pad_ncm("00001234"), "00001234");
        assert_eq!(pad_ncm(""), "00000000");
        assert_eq!(pad_ncm("123456789"), "123456789");
    }

    #[test]
    fn test_record_normalization() {
        let record = TradeRecord::new("1012100", "105", 10.0, 2.0, "bra");
        assert_eq!(record.ncm, "01012100");
        assert_eq!(record.iso3, "BRA");
        assert_eq!(record.value(Metric::FobValue), 10.0);
        assert_eq!(record.value(Metric::NetWeight), 2.0);
    }

    #[test]
    fn test_metric_parse_and_units() {
        assert_eq!("VL_FOB".parse::<Metric>().unwrap(), Metric::FobValue);
        assert_eq!("kg_liquido".parse::<Metric>().unwrap(), Metric::NetWeight);
        assert!("tons".parse::<Metric>().is_err());
        assert_eq!(Metric::FobValue.unit(), "R$");
        assert_eq!(Metric::NetWeight.unit(), "KG");
        assert_eq!(Metric::default(), Metric::FobValue);
    }
}
