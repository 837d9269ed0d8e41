use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGymSession {
    pub id: Option<String>,
    pub coach_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub capacity: Option<i32>,
    pub current_reservations: Option<i32>,
    pub attendance: Option<Vec<bool>>,
}

/// Partial update; schedule and capacity rules are re-checked on the merged session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GymSessionPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub coach_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub start_time: Patch<NaiveTime>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub end_time: Patch<NaiveTime>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub capacity: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub current_reservations: Patch<i32>,
}
