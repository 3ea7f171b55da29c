use std::collections::HashMap;

use crate::types::{
    ApplicationSource, ImportBatch, ProposedFellingSource, ProposedRestockingSource,
};

/// Lookup structures resolving the parent links between the three source
/// collections, built once per validation run.
///
/// Duplicate identifiers keep the first occurrence; the collection rules
/// report the duplication itself, so resolution stays deterministic.
#[derive(Debug)]
pub struct BatchIndex<'a> {
    applications: HashMap<i64, &'a ApplicationSource>,
    fellings: HashMap<i64, &'a ProposedFellingSource>,
    restockings_by_felling: HashMap<i64, Vec<&'a ProposedRestockingSource>>,
}

impl<'a> BatchIndex<'a> {
    pub fn build(batch: &'a ImportBatch) -> Self {
        let mut applications = HashMap::new();
        for application in &batch.applications {
            applications
                .entry(application.application_id)
                .or_insert(application);
        }

        let mut fellings = HashMap::new();
        for felling in &batch.fellings {
            fellings.entry(felling.proposed_felling_id).or_insert(felling);
        }

        let mut restockings_by_felling: HashMap<i64, Vec<&ProposedRestockingSource>> =
            HashMap::new();
        for restocking in &batch.restockings {
            restockings_by_felling
                .entry(restocking.proposed_felling_id)
                .or_default()
                .push(restocking);
        }

        Self {
            applications,
            fellings,
            restockings_by_felling,
        }
    }

    pub fn application(&self, id: i64) -> Option<&'a ApplicationSource> {
        self.applications.get(&id).copied()
    }

    pub fn felling(&self, id: i64) -> Option<&'a ProposedFellingSource> {
        self.fellings.get(&id).copied()
    }

    /// Restocking records linked to a felling, in input order.
    pub fn restockings_for(&self, felling_id: i64) -> &[&'a ProposedRestockingSource] {
        self.restockings_by_felling
            .get(&felling_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
