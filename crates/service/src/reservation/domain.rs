use chrono::NaiveDateTime;
use models::reservation::ReservationStatus;
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReservation {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    /// Defaults to now.
    pub reservation_date: Option<NaiveDateTime>,
    /// Defaults to `CONFIRMED`.
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub user_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub session_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub reservation_date: Patch<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub status: Patch<ReservationStatus>,
}
