//! Company profile types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company as the caller knows it before enrichment.
///
/// All descriptive fields are free text. Scoring recognizes specific
/// sector, stage, and location values; anything else falls into the
/// weak tier (see `scoring`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Stable identifier, generated when absent
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Company name
    pub name: String,

    /// Sector label (e.g. "ClimateTech", "DeepTech", "FinTech")
    #[serde(default)]
    pub sector: String,

    /// Funding stage (e.g. "Pre-Seed", "Seed", "Series A")
    #[serde(default)]
    pub stage: String,

    /// Headquarters location (e.g. "India", "Southeast Asia")
    #[serde(default)]
    pub location: String,

    /// Company website URL
    pub website: String,
}

impl CompanyProfile {
    /// Create a new profile with a fresh id.
    pub fn new(name: impl Into<String>, website: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sector: String::new(),
            stage: String::new(),
            location: String::new(),
            website: website.into(),
        }
    }

    /// Set the sector.
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    /// Set the funding stage.
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fills_fields() {
        let profile = CompanyProfile::new("Acme", "https://acme.example")
            .with_sector("ClimateTech")
            .with_stage("Seed")
            .with_location("India");

        assert_eq!(profile.name, "Acme");
        assert_eq!(profile.sector, "ClimateTech");
        assert_eq!(profile.stage, "Seed");
        assert_eq!(profile.location, "India");
        assert_eq!(profile.website, "https://acme.example");
    }

    #[test]
    fn test_deserialize_without_id_generates_one() {
        let json = r#"{
            "name": "Acme",
            "sector": "FinTech",
            "stage": "Series A",
            "location": "USA",
            "website": "https://acme.example"
        }"#;

        let profile: CompanyProfile = serde_json::from_str(json).unwrap();
        assert!(!profile.id.is_nil());
        assert_eq!(profile.sector, "FinTech");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let profile = CompanyProfile::new("Acme", "https://acme.example");
        let json = serde_json::to_value(&profile).unwrap();

        assert!(json.get("website").is_some());
        assert!(json.get("name").is_some());
        assert!(json.get("id").is_some());
    }
}
