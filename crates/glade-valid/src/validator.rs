use chrono::NaiveDate;

use glade_records::linkage::BatchIndex;
use glade_records::reference::ReferenceSnapshot;
use glade_records::types::failure::ValidationReport;
use glade_records::types::ImportBatch;

use crate::rules;

/// Validate an import batch against the reference snapshot.
///
/// Runs the collection-level rules for all three record kinds first, then
/// the record-level rules in dependency order (application, felling,
/// restocking), each record supplied with its resolved parent links. The
/// run never halts early: an unresolved parent surfaces as a failure on
/// the dependent record. Failure order is deterministic, collection stage
/// first, then input order within each record kind.
pub fn validate(
    batch: &ImportBatch,
    snapshot: &ReferenceSnapshot,
    today: NaiveDate,
) -> ValidationReport {
    let mut report = ValidationReport::success();

    rules::application::check_collection(&batch.applications, &mut report);
    rules::felling::check_collection(&batch.fellings, &mut report);
    rules::restocking::check_collection(&batch.restockings, &mut report);

    let index = BatchIndex::build(batch);

    for application in &batch.applications {
        rules::application::check(application, snapshot, today, &mut report);
    }

    for felling in &batch.fellings {
        let application = index.application(felling.application_id);
        let property = application.and_then(|a| snapshot.find_property(&a.property_name));
        let restockings = index.restockings_for(felling.proposed_felling_id);
        rules::felling::check(felling, application, property, restockings, snapshot, &mut report);
    }

    for restocking in &batch.restockings {
        let felling = index.felling(restocking.proposed_felling_id);
        let property = felling
            .and_then(|f| index.application(f.application_id))
            .and_then(|a| snapshot.find_property(&a.property_name));
        rules::restocking::check(restocking, felling, property, snapshot, &mut report);
    }

    report
}
