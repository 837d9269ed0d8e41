use chrono::NaiveDate;
use models::report::ReportEntry;
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReport {
    pub id: Option<String>,
    pub coach_id: Option<String>,
    pub description: Option<String>,
    pub generated_at: Option<NaiveDate>,
    pub entries: Option<Vec<ReportEntry>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub coach_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub generated_at: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub entries: Patch<Vec<ReportEntry>>,
}
