use serde::{Deserialize, Serialize};

use super::restocking::RestockingProposalType;

/// Kind of felling operation proposed for a compartment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FellingOperationType {
    /// Sentinel for an unset value in the legacy export
    None,
    ClearFelling,
    FellingOfCoppice,
    FellingIndividualTrees,
    RegenerationFelling,
    Thinning,
}

impl FellingOperationType {
    /// Restocking proposals permitted after this felling operation.
    ///
    /// Thinning carries no restocking obligation, so its set is empty.
    /// `DoNotIntendToRestock` is a self-declaration rather than a proposal
    /// and is never part of an allowed set.
    pub fn allowed_restocking(&self) -> &'static [RestockingProposalType] {
        use RestockingProposalType::*;

        match self {
            FellingOperationType::None => &[],
            FellingOperationType::ClearFelling => &[
                CreateDesignedOpenGround,
                NaturalColonisation,
                PlantAnAlternativeArea,
                ReplantTheFelledArea,
                RestockByNaturalRegeneration,
            ],
            FellingOperationType::FellingOfCoppice => {
                &[CreateDesignedOpenGround, RestockWithCoppiceRegrowth]
            }
            FellingOperationType::FellingIndividualTrees => &[
                CreateDesignedOpenGround,
                PlantAnAlternativeAreaWithIndividualTrees,
                RestockWithIndividualTrees,
            ],
            FellingOperationType::RegenerationFelling => &[
                CreateDesignedOpenGround,
                NaturalColonisation,
                RestockByNaturalRegeneration,
            ],
            FellingOperationType::Thinning => &[],
        }
    }
}

impl std::fmt::Display for FellingOperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FellingOperationType::None => "none",
            FellingOperationType::ClearFelling => "clear felling",
            FellingOperationType::FellingOfCoppice => "felling of coppice",
            FellingOperationType::FellingIndividualTrees => "felling individual trees",
            FellingOperationType::RegenerationFelling => "regeneration felling",
            FellingOperationType::Thinning => "thinning",
        };
        write!(f, "{text}")
    }
}

/// One proposed felling operation from the legacy import file.
/// Linked to its application via `application_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedFellingSource {
    pub proposed_felling_id: i64,
    pub application_id: i64,
    pub compartment_name: String,
    pub operation_type: FellingOperationType,
    pub area_to_be_felled: f64,
    pub number_of_trees: Option<i32>,
    pub estimated_total_felling_volume: f64,
    pub is_part_of_tree_preservation_order: bool,
    pub tree_preservation_order_reference: Option<String>,
    pub is_within_conservation_area: bool,
    pub conservation_area_reference: Option<String>,
    pub is_restocking: bool,
    pub no_restocking_reason: Option<String>,
    /// Comma-delimited species codes, e.g. "SS,OK"
    pub species: String,
}
