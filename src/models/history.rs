use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    // "YYYY-MM-DD" from the monitor, full ISO timestamps also accepted
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct ProductHistory {
    pub name: String,
    pub entries: Vec<HistoryEntry>,
}

/// `{ "history": { "<product name>": [ {date, price}, ... ] } }`
///
/// Key order from the file is kept: chart colors are assigned by position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryDocument {
    #[serde(default, deserialize_with = "ordered_history")]
    pub history: Vec<ProductHistory>,
}

impl HistoryDocument {
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn series(&self, name: &str) -> Option<&[HistoryEntry]> {
        self.history
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.entries.as_slice())
    }
}

fn ordered_history<'de, D>(deserializer: D) -> Result<Vec<ProductHistory>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedHistory;

    impl<'de> Visitor<'de> for OrderedHistory {
        type Value = Vec<ProductHistory>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map from product name to price entries")
        }

        // `"history": null` is an empty mapping
        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, entries)) = map.next_entry::<String, Vec<HistoryEntry>>()? {
                // duplicate keys: last one wins, first position kept
                match out.iter().position(|h: &ProductHistory| h.name == name) {
                    Some(i) => out[i].entries = entries,
                    None => out.push(ProductHistory { name, entries }),
                }
            }
            Ok(out)
        }
    }

    deserializer.deserialize_option(OrderedHistory)
}
