pub mod application;
pub mod failure;
pub mod felling;
pub mod restocking;

pub use application::ApplicationSource;
pub use felling::{FellingOperationType, ProposedFellingSource};
pub use restocking::{ProposedRestockingSource, RestockingProposalType};

use serde::{Deserialize, Serialize};

/// All source collections parsed from one legacy import file.
/// The three collections are hierarchically linked by id: a felling
/// references its application, a restocking references its felling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    pub applications: Vec<ApplicationSource>,
    pub fellings: Vec<ProposedFellingSource>,
    pub restockings: Vec<ProposedRestockingSource>,
}
