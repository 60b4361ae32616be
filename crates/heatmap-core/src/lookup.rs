//! Static ISO3 → geometry id table.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::error;

use crate::error::{HeatmapError, Result};
use crate::index::GeoId;

/// ISO3 → ISO 3166-1 numeric code, embedded at compile time.
const ISO3_TO_ID_JSON: &str = include_str!("../assets/iso3_to_id.json");

static EMBEDDED: OnceLock<CountryTable> = OnceLock::new();

/// Read-only mapping from ISO3 country code to map region id.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    ids: HashMap<String, GeoId>,
}

impl CountryTable {
    /// Returns the table bundled with the crate.
    pub fn embedded() -> &'static CountryTable {
        EMBEDDED.get_or_init(|| match Self::from_json(ISO3_TO_ID_JSON) {
            Ok(table) => table,
            Err(e) => {
                error!("Embedded country table is invalid: {}", e);
                CountryTable::default()
            }
        })
    }

    /// Parses a JSON object of `{"BRA": 76, ...}`. Ids may be numbers or numeric strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut ids = HashMap::with_capacity(raw.len());

        for (code, value) in raw {
            let id = match &value {
                serde_json::Value::Number(n) => n
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .map(GeoId::new),
                serde_json::Value::String(s) => GeoId::parse(s),
                _ => None,
            }
            .ok_or_else(|| HeatmapError::LookupTable(format!("{code}: {value}")))?;

            // zero never names a region
            if id.get() != 0 {
                ids.insert(code.trim().to_uppercase(), id);
            }
        }

        Ok(Self { ids })
    }

    /// Builds a table from explicit pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        Self {
            ids: pairs
                .into_iter()
                .filter(|(_, id)| *id != 0)
                .map(|(code, id)| (code.as_ref().trim().to_uppercase(), GeoId::new(id)))
                .collect(),
        }
    }

    /// Returns the region id for a country code.
    pub fn geo_id(&self, iso3: &str) -> Option<GeoId> {
        self.ids.get(iso3).copied()
    }

    /// Returns the number of known countries.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
