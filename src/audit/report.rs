//! # Lighthouse Report
//!
//! The subset of the Lighthouse JSON report that metric extraction reads.
//!
//! Everything else in the document is ignored during deserialization; the raw
//! text is kept separately (see [`crate::audit::AuditedReport`]) when it needs
//! to be cached.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// Parsed audit report for one URL
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// URL the audit was requested for (becomes the `instance` label)
    pub requested_url: String,
    /// Run timing
    pub timing: Timing,
    /// Categories in document order
    #[serde(default)]
    pub categories: Categories,
    /// Audits keyed by audit id
    #[serde(default)]
    pub audits: HashMap<String, Audit>,
}

impl Report {
    /// Parse a report from the tool's JSON output
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not JSON or does not have the report shape.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Look up an audit by id
    pub fn audit(&self, id: &str) -> Option<&Audit> {
        self.audits.get(id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Timing {
    /// Total run time in milliseconds
    pub total: f64,
}

/// A named grouping of audits, e.g. `performance`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category score in `[0, 1]`, `None` when Lighthouse could not score it
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub audit_refs: Vec<AuditRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditRef {
    pub id: String,
}

/// A single scored or measured check
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    /// Audit score, `None` for informative or not-applicable audits
    #[serde(default)]
    pub score: Option<f64>,
    /// Raw measurement (milliseconds for timing audits)
    #[serde(default)]
    pub numeric_value: Option<f64>,
}

/// Report categories, keeping the order they appear in the JSON document
///
/// Lighthouse writes categories in a stable order (performance first), and the
/// emitted samples follow it, so a plain `HashMap` is not enough here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Categories(Vec<(String, Category)>);

impl Categories {
    /// Iterate `(category id, category)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.0.iter().map(|(id, category)| (id.as_str(), category))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = Categories;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category id to category")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries: Vec<(String, Category)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));

                while let Some(id) = map.next_key::<String>()? {
                    if entries.iter().any(|(existing, _)| *existing == id) {
                        return Err(de::Error::custom(format!("duplicate category '{id}'")));
                    }
                    let category = map.next_value::<Category>()?;
                    entries.push((id, category));
                }

                Ok(Categories(entries))
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}
