use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One legacy felling-licence application row from the import file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSource {
    pub application_id: i64,
    /// Name of the woodland property the application covers
    pub property_name: String,
    pub felling_start_date: NaiveDate,
    pub felling_end_date: NaiveDate,
}
