use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A named compartment within a property. Area is in hectares when known;
/// the legacy property register does not record an area for every
/// compartment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompartmentIds {
    pub compartment_name: String,
    pub area: Option<f64>,
}

/// A woodland property and its compartments, as resolved for the
/// importing owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyIds {
    pub property_name: String,
    pub compartments: Vec<CompartmentIds>,
}

impl PropertyIds {
    /// Look up a compartment by name, trimmed and case-insensitive.
    pub fn find_compartment(&self, name: &str) -> Option<&CompartmentIds> {
        let wanted = canonicalize(name);
        self.compartments
            .iter()
            .find(|c| canonicalize(&c.compartment_name) == wanted)
    }
}

/// Immutable reference data resolved before a validation run: the owner's
/// properties with their compartments, and the canonical species codes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSnapshot {
    properties: Vec<PropertyIds>,
    species: HashSet<String>,
}

impl ReferenceSnapshot {
    pub fn new(
        properties: Vec<PropertyIds>,
        species: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            properties,
            species: species.into_iter().collect(),
        }
    }

    /// Look up a property by name, trimmed and case-insensitive.
    pub fn find_property(&self, name: &str) -> Option<&PropertyIds> {
        let wanted = canonicalize(name);
        self.properties
            .iter()
            .find(|p| canonicalize(&p.property_name) == wanted)
    }

    /// Whether a species code exists in the canonical list, compared
    /// exactly as stored.
    pub fn is_known_species(&self, code: &str) -> bool {
        self.species.contains(code)
    }
}

fn canonicalize(name: &str) -> String {
    name.trim().to_lowercase()
}
