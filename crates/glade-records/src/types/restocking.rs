use serde::{Deserialize, Serialize};

/// Kind of restocking proposed after a felling operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestockingProposalType {
    /// Sentinel for an unset value in the legacy export
    None,
    CreateDesignedOpenGround,
    DoNotIntendToRestock,
    NaturalColonisation,
    PlantAnAlternativeArea,
    PlantAnAlternativeAreaWithIndividualTrees,
    ReplantTheFelledArea,
    RestockByNaturalRegeneration,
    RestockWithCoppiceRegrowth,
    RestockWithIndividualTrees,
}

impl RestockingProposalType {
    /// Whether this proposal restocks a compartment other than the felled one.
    pub fn is_alternative_compartment(&self) -> bool {
        matches!(
            self,
            RestockingProposalType::NaturalColonisation
                | RestockingProposalType::PlantAnAlternativeArea
                | RestockingProposalType::PlantAnAlternativeAreaWithIndividualTrees
        )
    }

    /// Whether this proposal is sized by a tree count rather than a density.
    pub fn is_number_of_trees(&self) -> bool {
        matches!(
            self,
            RestockingProposalType::RestockWithIndividualTrees
                | RestockingProposalType::PlantAnAlternativeAreaWithIndividualTrees
        )
    }
}

impl std::fmt::Display for RestockingProposalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RestockingProposalType::None => "none",
            RestockingProposalType::CreateDesignedOpenGround => "create designed open ground",
            RestockingProposalType::DoNotIntendToRestock => "do not intend to restock",
            RestockingProposalType::NaturalColonisation => "natural colonisation",
            RestockingProposalType::PlantAnAlternativeArea => "plant an alternative area",
            RestockingProposalType::PlantAnAlternativeAreaWithIndividualTrees => {
                "plant an alternative area with individual trees"
            }
            RestockingProposalType::ReplantTheFelledArea => "replant the felled area",
            RestockingProposalType::RestockByNaturalRegeneration => {
                "restock by natural regeneration"
            }
            RestockingProposalType::RestockWithCoppiceRegrowth => {
                "restock with coppice regrowth"
            }
            RestockingProposalType::RestockWithIndividualTrees => {
                "restock with individual trees"
            }
        };
        write!(f, "{text}")
    }
}

/// One proposed restocking operation from the legacy import file.
/// Linked to its felling operation via `proposed_felling_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedRestockingSource {
    pub proposed_felling_id: i64,
    pub restocking_proposal: RestockingProposalType,
    /// Only meaningful for alternative-compartment proposals
    pub compartment_name: Option<String>,
    pub area_to_be_restocked: f64,
    pub restocking_density: Option<f64>,
    pub number_of_trees: Option<i32>,
    /// Comma-delimited alternating code/percentage pairs, e.g. "SS,60,OK,40"
    pub species_and_percentages: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternative_compartment_classification() {
        assert!(RestockingProposalType::PlantAnAlternativeArea.is_alternative_compartment());
        assert!(RestockingProposalType::NaturalColonisation.is_alternative_compartment());
        assert!(RestockingProposalType::PlantAnAlternativeAreaWithIndividualTrees
            .is_alternative_compartment());
        assert!(!RestockingProposalType::ReplantTheFelledArea.is_alternative_compartment());
        assert!(!RestockingProposalType::CreateDesignedOpenGround.is_alternative_compartment());
    }

    #[test]
    fn test_number_of_trees_classification() {
        assert!(RestockingProposalType::RestockWithIndividualTrees.is_number_of_trees());
        assert!(RestockingProposalType::PlantAnAlternativeAreaWithIndividualTrees
            .is_number_of_trees());
        assert!(!RestockingProposalType::ReplantTheFelledArea.is_number_of_trees());
    }

    #[test]
    fn test_restocking_json_field_names() {
        let restocking = ProposedRestockingSource {
            proposed_felling_id: 10,
            restocking_proposal: RestockingProposalType::ReplantTheFelledArea,
            compartment_name: None,
            area_to_be_restocked: 2.0,
            restocking_density: Some(1100.0),
            number_of_trees: None,
            species_and_percentages: "SS,50,OK,50".to_string(),
        };

        let json = serde_json::to_value(&restocking).unwrap();
        assert_eq!(json["proposedFellingId"], 10);
        assert_eq!(json["restockingProposal"], "ReplantTheFelledArea");
        assert_eq!(json["speciesAndPercentages"], "SS,50,OK,50");
    }
}
