use std::collections::HashSet;

use glade_records::reference::{PropertyIds, ReferenceSnapshot};
use glade_records::species::parse_species_percentages;
use glade_records::types::failure::{
    RecordKind, ValidationFailure, ValidationReport, E_AREA_EXCEEDED, E_DUPLICATE_COMBINATION,
    E_DUPLICATE_SPECIES, E_MISSING_FIELD, E_OUT_OF_RANGE, E_PARENT_NOT_FOUND, E_PERCENTAGE_SUM,
    E_PROPOSAL_NOT_ALLOWED, E_SAME_COMPARTMENT, E_SPECIES_FORMAT, E_UNKNOWN_COMPARTMENT,
    E_UNKNOWN_SPECIES,
};
use glade_records::types::{
    ProposedFellingSource, ProposedRestockingSource, RestockingProposalType,
};

/// Record-level checks for one proposed restocking operation. Every check
/// is independent; failures accumulate and none short-circuits another.
pub fn check(
    restocking: &ProposedRestockingSource,
    felling: Option<&ProposedFellingSource>,
    property: Option<&PropertyIds>,
    snapshot: &ReferenceSnapshot,
    report: &mut ValidationReport,
) {
    let id = Some(restocking.proposed_felling_id);
    let kind = RecordKind::ProposedRestocking;
    let proposal = restocking.restocking_proposal;
    let own_compartment = restocking
        .compartment_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    if felling.is_none() {
        report.push(
            ValidationFailure::error(
                E_PARENT_NOT_FOUND,
                kind,
                id,
                format!(
                    "References proposed felling {} which is not in the batch",
                    restocking.proposed_felling_id
                ),
            )
            .with_field("proposed_felling_id"),
        );
    }

    if let Some(felling) = felling {
        if !felling.operation_type.allowed_restocking().contains(&proposal) {
            report.push(
                ValidationFailure::error(
                    E_PROPOSAL_NOT_ALLOWED,
                    kind,
                    id,
                    format!(
                        "Restocking by {} is not permitted after {}",
                        proposal, felling.operation_type
                    ),
                )
                .with_field("restocking_proposal"),
            );
        }
    }

    if proposal.is_alternative_compartment() {
        match own_compartment {
            None => {
                report.push(
                    ValidationFailure::error(
                        E_MISSING_FIELD,
                        kind,
                        id,
                        "A compartment name is required when restocking an alternative compartment",
                    )
                    .with_field("compartment_name"),
                );
            }
            Some(name) => {
                if let Some(property) = property {
                    if property.find_compartment(name).is_none() {
                        report.push(
                            ValidationFailure::error(
                                E_UNKNOWN_COMPARTMENT,
                                kind,
                                id,
                                format!(
                                    "Compartment '{}' was not found in property '{}'",
                                    name, property.property_name
                                ),
                            )
                            .with_field("compartment_name"),
                        );
                    }
                }
                if let Some(felling) = felling {
                    if name.to_lowercase() == felling.compartment_name.trim().to_lowercase() {
                        report.push(
                            ValidationFailure::error(
                                E_SAME_COMPARTMENT,
                                kind,
                                id,
                                format!(
                                    "Alternative restocking compartment '{}' must differ from the felled compartment",
                                    name
                                ),
                            )
                            .with_field("compartment_name"),
                        );
                    }
                }
            }
        }
    }

    // Alternative-compartment proposals are bounded by their own compartment;
    // everything else by the felled compartment.
    let bound = if proposal.is_alternative_compartment() {
        own_compartment
            .and_then(|name| property.and_then(|p| p.find_compartment(name)))
            .and_then(|c| c.area)
    } else {
        felling
            .and_then(|f| property.and_then(|p| p.find_compartment(f.compartment_name.trim())))
            .and_then(|c| c.area)
    };
    if let Some(bound) = bound {
        if restocking.area_to_be_restocked > bound {
            report.push(
                ValidationFailure::error(
                    E_AREA_EXCEEDED,
                    kind,
                    id,
                    format!(
                        "Area to be restocked {:.2} exceeds the compartment area {:.2}",
                        restocking.area_to_be_restocked, bound
                    ),
                )
                .with_field("area_to_be_restocked"),
            );
        }
    }

    if restocking.area_to_be_restocked <= 0.0 {
        report.push(
            ValidationFailure::error(
                E_OUT_OF_RANGE,
                kind,
                id,
                "Area to be restocked must be greater than zero",
            )
            .with_field("area_to_be_restocked"),
        );
    }

    if !proposal.is_number_of_trees()
        && proposal != RestockingProposalType::CreateDesignedOpenGround
        && !restocking.restocking_density.is_some_and(|d| d > 0.0)
    {
        report.push(
            ValidationFailure::error(
                E_OUT_OF_RANGE,
                kind,
                id,
                "Restocking density must be provided and greater than zero",
            )
            .with_field("restocking_density"),
        );
    }

    if proposal.is_number_of_trees() && !restocking.number_of_trees.is_some_and(|n| n > 0) {
        report.push(
            ValidationFailure::error(
                E_OUT_OF_RANGE,
                kind,
                id,
                "Number of trees must be provided and greater than zero for this proposal",
            )
            .with_field("number_of_trees"),
        );
    }

    if proposal != RestockingProposalType::CreateDesignedOpenGround {
        check_species_percentages(restocking, snapshot, report);
    }
}

/// Restocking species codes are de-duplicated case-insensitively; the
/// percentages must be whole numbers summing to exactly 100.
fn check_species_percentages(
    restocking: &ProposedRestockingSource,
    snapshot: &ReferenceSnapshot,
    report: &mut ValidationReport,
) {
    let id = Some(restocking.proposed_felling_id);
    let kind = RecordKind::ProposedRestocking;
    let raw = restocking.species_and_percentages.trim();

    if raw.is_empty() {
        report.push(
            ValidationFailure::error(
                E_MISSING_FIELD,
                kind,
                id,
                "Species and percentages are required",
            )
            .with_field("species_and_percentages"),
        );
        return;
    }

    let pairs = match parse_species_percentages(raw) {
        Ok(pairs) => pairs,
        Err(err) => {
            report.push(
                ValidationFailure::error(E_SPECIES_FORMAT, kind, id, err.to_string())
                    .with_field("species_and_percentages"),
            );
            return;
        }
    };

    let mut seen = HashSet::new();
    for (code, _) in &pairs {
        if !snapshot.is_known_species(code) {
            report.push(
                ValidationFailure::error(
                    E_UNKNOWN_SPECIES,
                    kind,
                    id,
                    format!("Species code '{code}' is not a known species"),
                )
                .with_field("species_and_percentages"),
            );
        }
        if !seen.insert(code.to_lowercase()) {
            report.push(
                ValidationFailure::error(
                    E_DUPLICATE_SPECIES,
                    kind,
                    id,
                    format!("Species code '{code}' is listed more than once"),
                )
                .with_field("species_and_percentages"),
            );
        }
    }

    let total: i64 = pairs.iter().map(|(_, percentage)| *percentage).sum();
    if total != 100 {
        report.push(
            ValidationFailure::error(
                E_PERCENTAGE_SUM,
                kind,
                id,
                format!("Species percentages must sum to 100, found {total}"),
            )
            .with_field("species_and_percentages"),
        );
    }
}

/// Batch-level uniqueness for proposed restockings, evaluated as two
/// disjoint partitions: same-compartment proposals must not repeat a
/// (felling, proposal) pair, alternative-compartment proposals must not
/// repeat a (felling, compartment, proposal) triple. Each invariant is
/// reported at most once.
pub fn check_collection(
    restockings: &[ProposedRestockingSource],
    report: &mut ValidationReport,
) {
    let mut seen_same = HashSet::new();
    let mut same_reported = false;
    let mut seen_alternative = HashSet::new();
    let mut alternative_reported = false;

    for restocking in restockings {
        if restocking.restocking_proposal.is_alternative_compartment() {
            let key = (
                restocking.proposed_felling_id,
                restocking.compartment_name.clone().unwrap_or_default(),
                restocking.restocking_proposal,
            );
            if !alternative_reported && !seen_alternative.insert(key) {
                report.push(ValidationFailure::error(
                    E_DUPLICATE_COMBINATION,
                    RecordKind::ProposedRestocking,
                    None,
                    format!(
                        "Proposed felling {} restocks the same alternative compartment with {} more than once",
                        restocking.proposed_felling_id, restocking.restocking_proposal
                    ),
                ));
                alternative_reported = true;
            }
        } else {
            let key = (restocking.proposed_felling_id, restocking.restocking_proposal);
            if !same_reported && !seen_same.insert(key) {
                report.push(ValidationFailure::error(
                    E_DUPLICATE_COMBINATION,
                    RecordKind::ProposedRestocking,
                    None,
                    format!(
                        "Proposed felling {} proposes restocking by {} more than once",
                        restocking.proposed_felling_id, restocking.restocking_proposal
                    ),
                ));
                same_reported = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glade_records::reference::CompartmentIds;
    use glade_records::types::FellingOperationType;

    fn snapshot() -> ReferenceSnapshot {
        ReferenceSnapshot::new(
            vec![PropertyIds {
                property_name: "Birch Hollow".to_string(),
                compartments: vec![
                    CompartmentIds {
                        compartment_name: "C1".to_string(),
                        area: Some(3.5),
                    },
                    CompartmentIds {
                        compartment_name: "C2".to_string(),
                        area: Some(1.5),
                    },
                    CompartmentIds {
                        compartment_name: "C3".to_string(),
                        area: None,
                    },
                ],
            }],
            ["SS".to_string(), "OK".to_string()],
        )
    }

    fn felling() -> ProposedFellingSource {
        ProposedFellingSource {
            proposed_felling_id: 10,
            application_id: 1,
            compartment_name: "C1".to_string(),
            operation_type: FellingOperationType::ClearFelling,
            area_to_be_felled: 2.0,
            number_of_trees: None,
            estimated_total_felling_volume: 80.0,
            is_part_of_tree_preservation_order: false,
            tree_preservation_order_reference: None,
            is_within_conservation_area: false,
            conservation_area_reference: None,
            is_restocking: true,
            no_restocking_reason: None,
            species: "SS,OK".to_string(),
        }
    }

    fn restocking() -> ProposedRestockingSource {
        ProposedRestockingSource {
            proposed_felling_id: 10,
            restocking_proposal: RestockingProposalType::ReplantTheFelledArea,
            compartment_name: None,
            area_to_be_restocked: 2.0,
            restocking_density: Some(1100.0),
            number_of_trees: None,
            species_and_percentages: "SS,50,OK,50".to_string(),
        }
    }

    fn run(
        restocking: &ProposedRestockingSource,
        felling: Option<&ProposedFellingSource>,
    ) -> ValidationReport {
        let snapshot = snapshot();
        let property = snapshot.find_property("Birch Hollow");
        let mut report = ValidationReport::success();
        check(restocking, felling, property, &snapshot, &mut report);
        report
    }

    #[test]
    fn test_valid_restocking_passes() {
        let parent = felling();
        let report = run(&restocking(), Some(&parent));
        assert!(report.ok, "unexpected failures: {:?}", report.failures);
    }

    #[test]
    fn test_missing_parent_felling() {
        let report = run(&restocking(), None);
        assert!(report.failures.iter().any(|f| f.code == E_PARENT_NOT_FOUND));
    }

    #[test]
    fn test_proposal_not_allowed_for_operation() {
        let mut parent = felling();
        parent.operation_type = FellingOperationType::FellingOfCoppice;

        let report = run(&restocking(), Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_PROPOSAL_NOT_ALLOWED));
    }

    #[test]
    fn test_unset_proposal_never_allowed() {
        let parent = felling();
        let mut record = restocking();
        record.restocking_proposal = RestockingProposalType::None;

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_PROPOSAL_NOT_ALLOWED));
    }

    #[test]
    fn test_alternative_compartment_required() {
        let parent = felling();
        let mut record = restocking();
        record.restocking_proposal = RestockingProposalType::PlantAnAlternativeArea;
        record.compartment_name = None;

        let report = run(&record, Some(&parent));
        assert!(report
            .failures
            .iter()
            .any(|f| f.code == E_MISSING_FIELD
                && f.field_name.as_deref() == Some("compartment_name")));
    }

    #[test]
    fn test_alternative_compartment_must_exist() {
        let parent = felling();
        let mut record = restocking();
        record.restocking_proposal = RestockingProposalType::PlantAnAlternativeArea;
        record.compartment_name = Some("C9".to_string());
        record.area_to_be_restocked = 1.0;

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_UNKNOWN_COMPARTMENT));
    }

    #[test]
    fn test_alternative_compartment_must_differ() {
        let parent = felling();
        let mut record = restocking();
        record.restocking_proposal = RestockingProposalType::PlantAnAlternativeArea;
        record.compartment_name = Some("c1".to_string()); // parent fells C1

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_SAME_COMPARTMENT));
    }

    #[test]
    fn test_alternative_compartment_valid() {
        let parent = felling();
        let mut record = restocking();
        record.restocking_proposal = RestockingProposalType::PlantAnAlternativeArea;
        record.compartment_name = Some("C2".to_string());
        record.area_to_be_restocked = 1.0;

        let report = run(&record, Some(&parent));
        assert!(report.ok, "unexpected failures: {:?}", report.failures);
    }

    #[test]
    fn test_same_compartment_area_bound_uses_felled_compartment() {
        let parent = felling(); // fells C1, area 3.5
        let mut record = restocking();
        record.area_to_be_restocked = 4.0;

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_AREA_EXCEEDED));
    }

    #[test]
    fn test_alternative_area_bound_uses_own_compartment() {
        let parent = felling();
        let mut record = restocking();
        record.restocking_proposal = RestockingProposalType::PlantAnAlternativeArea;
        record.compartment_name = Some("C2".to_string()); // area 1.5
        record.area_to_be_restocked = 2.0;

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_AREA_EXCEEDED));
    }

    #[test]
    fn test_unknown_area_skips_bound() {
        let mut parent = felling();
        parent.compartment_name = "C3".to_string(); // area unknown
        let mut record = restocking();
        record.area_to_be_restocked = 1000.0;

        let report = run(&record, Some(&parent));
        assert!(!report.failures.iter().any(|f| f.code == E_AREA_EXCEEDED));
    }

    #[test]
    fn test_non_positive_area() {
        let parent = felling();
        let mut record = restocking();
        record.area_to_be_restocked = 0.0;

        let report = run(&record, Some(&parent));
        assert!(report
            .failures
            .iter()
            .any(|f| f.code == E_OUT_OF_RANGE
                && f.field_name.as_deref() == Some("area_to_be_restocked")));
    }

    #[test]
    fn test_density_required_for_area_proposals() {
        let parent = felling();
        let mut record = restocking();
        record.restocking_density = None;

        let report = run(&record, Some(&parent));
        assert!(report
            .failures
            .iter()
            .any(|f| f.field_name.as_deref() == Some("restocking_density")));
    }

    #[test]
    fn test_density_not_required_for_open_ground() {
        let parent = felling();
        let mut record = restocking();
        record.restocking_proposal = RestockingProposalType::CreateDesignedOpenGround;
        record.restocking_density = None;
        record.species_and_percentages = String::new();

        let report = run(&record, Some(&parent));
        assert!(report.ok, "unexpected failures: {:?}", report.failures);
    }

    #[test]
    fn test_tree_count_proposals_require_count_not_density() {
        let mut parent = felling();
        parent.operation_type = FellingOperationType::FellingIndividualTrees;
        let mut record = restocking();
        record.restocking_proposal = RestockingProposalType::RestockWithIndividualTrees;
        record.restocking_density = None;
        record.number_of_trees = None;

        let report = run(&record, Some(&parent));
        assert!(report
            .failures
            .iter()
            .any(|f| f.field_name.as_deref() == Some("number_of_trees")));
        assert!(!report
            .failures
            .iter()
            .any(|f| f.field_name.as_deref() == Some("restocking_density")));

        record.number_of_trees = Some(40);
        let report = run(&record, Some(&parent));
        assert!(report.ok, "unexpected failures: {:?}", report.failures);
    }

    #[test]
    fn test_percentages_must_sum_to_one_hundred() {
        let parent = felling();
        let mut record = restocking();
        record.species_and_percentages = "SS,60,OK,41".to_string();

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_PERCENTAGE_SUM));

        record.species_and_percentages = "SS,60,OK,40".to_string();
        let report = run(&record, Some(&parent));
        assert!(!report.failures.iter().any(|f| f.code == E_PERCENTAGE_SUM));
    }

    #[test]
    fn test_percentages_format_failures() {
        let parent = felling();
        let mut record = restocking();
        record.species_and_percentages = "SS,60,OK".to_string();

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_SPECIES_FORMAT));

        record.species_and_percentages = "SS,sixty".to_string();
        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_SPECIES_FORMAT));
    }

    #[test]
    fn test_extreme_percentages_fail_without_panicking() {
        let parent = felling();
        let mut record = restocking();
        record.species_and_percentages =
            "SS,9223372036854775807,OK,9223372036854775807".to_string();

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_SPECIES_FORMAT));
        assert!(!report.failures.iter().any(|f| f.code == E_PERCENTAGE_SUM));
    }

    #[test]
    fn test_species_codes_distinct_case_insensitive() {
        let parent = felling();
        let mut record = restocking();
        record.species_and_percentages = "SS,50,ss,50".to_string();

        let report = run(&record, Some(&parent));
        assert!(report.failures.iter().any(|f| f.code == E_DUPLICATE_SPECIES));
    }

    #[test]
    fn test_species_required_unless_open_ground() {
        let parent = felling();
        let mut record = restocking();
        record.species_and_percentages = "  ".to_string();

        let report = run(&record, Some(&parent));
        assert!(report
            .failures
            .iter()
            .any(|f| f.code == E_MISSING_FIELD
                && f.field_name.as_deref() == Some("species_and_percentages")));
    }

    #[test]
    fn test_collection_same_compartment_pairs_distinct() {
        let a = restocking();
        let b = restocking();

        let mut report = ValidationReport::success();
        check_collection(&[a, b], &mut report);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].code, E_DUPLICATE_COMBINATION);
        assert_eq!(report.failures[0].record_id, None);
    }

    #[test]
    fn test_collection_alternative_triples_distinct() {
        let mut a = restocking();
        a.restocking_proposal = RestockingProposalType::PlantAnAlternativeArea;
        a.compartment_name = Some("C2".to_string());
        let b = a.clone();
        let mut c = a.clone();
        c.compartment_name = Some("C3".to_string());

        let mut report = ValidationReport::success();
        check_collection(&[a, b, c], &mut report);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_collection_partitions_are_disjoint() {
        // Same (felling, proposal) pair across the two partitions is fine
        let same = restocking();
        let mut alternative = restocking();
        alternative.restocking_proposal = RestockingProposalType::PlantAnAlternativeArea;
        alternative.compartment_name = Some("C2".to_string());

        let mut report = ValidationReport::success();
        check_collection(&[same, alternative], &mut report);
        assert!(report.ok);
    }
}
