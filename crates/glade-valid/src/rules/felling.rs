use std::collections::HashSet;

use glade_records::reference::{PropertyIds, ReferenceSnapshot};
use glade_records::species::parse_species_list;
use glade_records::types::failure::{
    RecordKind, ValidationFailure, ValidationReport, E_AREA_EXCEEDED, E_DUPLICATE_COMBINATION,
    E_DUPLICATE_ID, E_DUPLICATE_SPECIES, E_MISSING_FIELD, E_OUT_OF_RANGE, E_PARENT_NOT_FOUND,
    E_RESTOCKING_REQUIRED, E_UNKNOWN_COMPARTMENT, E_UNKNOWN_SPECIES,
};
use glade_records::types::{
    ApplicationSource, FellingOperationType, ProposedFellingSource, ProposedRestockingSource,
};

/// Record-level checks for one proposed felling operation. Every check is
/// independent; failures accumulate and none short-circuits another.
pub fn check(
    felling: &ProposedFellingSource,
    application: Option<&ApplicationSource>,
    property: Option<&PropertyIds>,
    restockings: &[&ProposedRestockingSource],
    snapshot: &ReferenceSnapshot,
    report: &mut ValidationReport,
) {
    let id = Some(felling.proposed_felling_id);
    let kind = RecordKind::ProposedFelling;
    let compartment_name = felling.compartment_name.trim();

    if application.is_none() {
        report.push(
            ValidationFailure::error(
                E_PARENT_NOT_FOUND,
                kind,
                id,
                format!(
                    "References application {} which is not in the batch",
                    felling.application_id
                ),
            )
            .with_field("application_id"),
        );
    }

    if compartment_name.is_empty() {
        report.push(
            ValidationFailure::error(E_MISSING_FIELD, kind, id, "Compartment name is required")
                .with_field("compartment_name"),
        );
    }

    let compartment = property.and_then(|p| p.find_compartment(compartment_name));
    if let Some(property) = property {
        if !compartment_name.is_empty() && compartment.is_none() {
            report.push(
                ValidationFailure::error(
                    E_UNKNOWN_COMPARTMENT,
                    kind,
                    id,
                    format!(
                        "Compartment '{}' was not found in property '{}'",
                        compartment_name, property.property_name
                    ),
                )
                .with_field("compartment_name"),
            );
        }
    }

    if felling.operation_type == FellingOperationType::None {
        report.push(
            ValidationFailure::error(E_MISSING_FIELD, kind, id, "Operation type is required")
                .with_field("operation_type"),
        );
    }

    if felling.is_restocking
        && !felling.operation_type.allowed_restocking().is_empty()
        && restockings.is_empty()
    {
        report.push(
            ValidationFailure::error(
                E_RESTOCKING_REQUIRED,
                kind,
                id,
                format!(
                    "A {} operation marked for restocking must have at least one restocking proposal",
                    felling.operation_type
                ),
            )
            .with_field("is_restocking"),
        );
    }

    if let Some(area) = compartment.and_then(|c| c.area) {
        if felling.area_to_be_felled > area {
            report.push(
                ValidationFailure::error(
                    E_AREA_EXCEEDED,
                    kind,
                    id,
                    format!(
                        "Area to be felled {:.2} exceeds the compartment area {:.2}",
                        felling.area_to_be_felled, area
                    ),
                )
                .with_field("area_to_be_felled"),
            );
        }
    }

    if felling.area_to_be_felled <= 0.0 {
        report.push(
            ValidationFailure::error(
                E_OUT_OF_RANGE,
                kind,
                id,
                "Area to be felled must be greater than zero",
            )
            .with_field("area_to_be_felled"),
        );
    }

    if felling.operation_type == FellingOperationType::FellingIndividualTrees
        && !felling.number_of_trees.is_some_and(|n| n > 0)
    {
        report.push(
            ValidationFailure::error(
                E_OUT_OF_RANGE,
                kind,
                id,
                "Number of trees must be provided and greater than zero when felling individual trees",
            )
            .with_field("number_of_trees"),
        );
    }

    if felling.estimated_total_felling_volume <= 0.0 {
        report.push(
            ValidationFailure::error(
                E_OUT_OF_RANGE,
                kind,
                id,
                "Estimated total felling volume must be greater than zero",
            )
            .with_field("estimated_total_felling_volume"),
        );
    }

    if felling.is_part_of_tree_preservation_order
        && is_blank(&felling.tree_preservation_order_reference)
    {
        report.push(
            ValidationFailure::error(
                E_MISSING_FIELD,
                kind,
                id,
                "Tree preservation order reference is required",
            )
            .with_field("tree_preservation_order_reference"),
        );
    }

    if felling.is_within_conservation_area && is_blank(&felling.conservation_area_reference) {
        report.push(
            ValidationFailure::error(
                E_MISSING_FIELD,
                kind,
                id,
                "Conservation area reference is required",
            )
            .with_field("conservation_area_reference"),
        );
    }

    if !felling.is_restocking
        && felling.operation_type != FellingOperationType::Thinning
        && is_blank(&felling.no_restocking_reason)
    {
        report.push(
            ValidationFailure::error(
                E_MISSING_FIELD,
                kind,
                id,
                "A reason is required when no restocking is proposed",
            )
            .with_field("no_restocking_reason"),
        );
    }

    check_species(felling, snapshot, report);
}

/// Species codes are compared exactly as stored; the legacy export uses a
/// controlled vocabulary.
fn check_species(
    felling: &ProposedFellingSource,
    snapshot: &ReferenceSnapshot,
    report: &mut ValidationReport,
) {
    let id = Some(felling.proposed_felling_id);
    let kind = RecordKind::ProposedFelling;

    if felling.species.trim().is_empty() {
        report.push(
            ValidationFailure::error(E_MISSING_FIELD, kind, id, "At least one species is required")
                .with_field("species"),
        );
        return;
    }

    let mut seen = HashSet::new();
    for token in parse_species_list(&felling.species) {
        if !snapshot.is_known_species(&token) {
            report.push(
                ValidationFailure::error(
                    E_UNKNOWN_SPECIES,
                    kind,
                    id,
                    format!("Species code '{token}' is not a known species"),
                )
                .with_field("species"),
            );
        }
        if !seen.insert(token.clone()) {
            report.push(
                ValidationFailure::error(
                    E_DUPLICATE_SPECIES,
                    kind,
                    id,
                    format!("Species code '{token}' is listed more than once"),
                )
                .with_field("species"),
            );
        }
    }
}

/// Batch-level uniqueness for proposed fellings: distinct identifiers and
/// distinct (application, compartment, operation) combinations. Each
/// invariant is reported at most once. Combinations compare the stored
/// compartment strings case-sensitively; they originate from a controlled
/// legacy export.
pub fn check_collection(fellings: &[ProposedFellingSource], report: &mut ValidationReport) {
    let mut seen_ids = HashSet::new();
    let mut id_reported = false;
    let mut seen_combinations = HashSet::new();
    let mut combination_reported = false;

    for felling in fellings {
        if !id_reported && !seen_ids.insert(felling.proposed_felling_id) {
            report.push(
                ValidationFailure::error(
                    E_DUPLICATE_ID,
                    RecordKind::ProposedFelling,
                    None,
                    format!(
                        "Duplicate proposed felling id {} in the import batch",
                        felling.proposed_felling_id
                    ),
                )
                .with_field("proposed_felling_id"),
            );
            id_reported = true;
        }

        let combination = (
            felling.application_id,
            felling.compartment_name.clone(),
            felling.operation_type,
        );
        if !combination_reported && !seen_combinations.insert(combination) {
            report.push(
                ValidationFailure::error(
                    E_DUPLICATE_COMBINATION,
                    RecordKind::ProposedFelling,
                    None,
                    format!(
                        "Application {} proposes {} in compartment '{}' more than once",
                        felling.application_id, felling.operation_type, felling.compartment_name
                    ),
                ),
            );
            combination_reported = true;
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
