//! Career catalog: the static table of career definitions, grouped by sector.
//!
//! Compiled into the binary from `data/careers.json`, parsed once at startup and
//! shared read-only as `Arc<CareerCatalog>` in `AppState`.

use serde::{Deserialize, Serialize};

const EMBEDDED_CATALOG: &str = include_str!("../../data/careers.json");

/// One career option within a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub required_education: Vec<String>,
    pub skills: Vec<String>,
    pub work_environment: Vec<String>,
    /// Sector tags matched against the user's field of study.
    pub sectors: Vec<String>,
    pub base_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub careers: Vec<CareerDefinition>,
}

/// Ordered sectors, each with its ordered careers. Order is document order and
/// is the final tie-breaker when ranking matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerCatalog {
    sectors: Vec<Sector>,
}

impl CareerCatalog {
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self { sectors }
    }

    /// Parses the catalog shipped with the binary.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<Sector>>(json).map(Self::new)
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Iterates `(sector name, career)` pairs in catalog order.
    pub fn careers(&self) -> impl Iterator<Item = (&str, &CareerDefinition)> {
        self.sectors
            .iter()
            .flat_map(|s| s.careers.iter().map(move |c| (s.name.as_str(), c)))
    }

    /// Looks up a career by id, returning it with its sector name.
    pub fn find(&self, id: &str) -> Option<(&str, &CareerDefinition)> {
        self.careers().find(|(_, c)| c.id == id)
    }

    pub fn career_count(&self) -> usize {
        self.sectors.iter().map(|s| s.careers.len()).sum()
    }
}
