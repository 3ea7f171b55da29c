use std::collections::HashSet;

use chrono::NaiveDate;

use glade_records::reference::ReferenceSnapshot;
use glade_records::types::failure::{
    RecordKind, ValidationFailure, ValidationReport, E_DATE_ORDER, E_DUPLICATE_ID,
    E_UNKNOWN_PROPERTY,
};
use glade_records::types::ApplicationSource;

/// Record-level checks for one application.
pub fn check(
    application: &ApplicationSource,
    snapshot: &ReferenceSnapshot,
    today: NaiveDate,
    report: &mut ValidationReport,
) {
    let id = Some(application.application_id);

    if snapshot.find_property(&application.property_name).is_none() {
        report.push(
            ValidationFailure::error(
                E_UNKNOWN_PROPERTY,
                RecordKind::Application,
                id,
                format!(
                    "Property '{}' was not found for this owner",
                    application.property_name
                ),
            )
            .with_field("property_name"),
        );
    }

    if application.felling_start_date <= today {
        report.push(
            ValidationFailure::error(
                E_DATE_ORDER,
                RecordKind::Application,
                id,
                format!(
                    "Felling start date {} must be after the import date {}",
                    application.felling_start_date, today
                ),
            )
            .with_field("felling_start_date"),
        );
    }

    if application.felling_end_date <= application.felling_start_date {
        report.push(
            ValidationFailure::error(
                E_DATE_ORDER,
                RecordKind::Application,
                id,
                format!(
                    "Felling end date {} must be after the felling start date {}",
                    application.felling_end_date, application.felling_start_date
                ),
            )
            .with_field("felling_end_date"),
        );
    }
}

/// Batch-level uniqueness of application identifiers. The collection is
/// valid or invalid as a whole: the first repeated id produces a single
/// failure and ends the scan.
pub fn check_collection(applications: &[ApplicationSource], report: &mut ValidationReport) {
    let mut seen = HashSet::new();

    for application in applications {
        if !seen.insert(application.application_id) {
            report.push(
                ValidationFailure::error(
                    E_DUPLICATE_ID,
                    RecordKind::Application,
                    None,
                    format!(
                        "Duplicate application id {} in the import batch",
                        application.application_id
                    ),
                )
                .with_field("application_id"),
            );
            return;
        }
    }
}
