use chrono::NaiveDate;
use models::physical_progress::{Measurements, Routine};
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPhysicalProgress {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub routine: Option<Routine>,
    pub measurements: Option<Measurements>,
    pub goal: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

/// `routine` and `goal` are nullable: an explicit `null` clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhysicalProgressPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub routine: Patch<Option<Routine>>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub measurements: Patch<MeasurementsPatch>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub goal: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub registration_date: Patch<NaiveDate>,
}

/// Per-measurement patch: only the values present in the body overwrite the stored ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeasurementsPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub weight: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub height: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub waist: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub chest: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub right_arm: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub left_arm: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub right_leg: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub left_leg: Patch<f64>,
}

impl MeasurementsPatch {
    pub fn merge_into(self, target: &mut Measurements) {
        self.weight.apply_to(&mut target.weight);
        self.height.apply_to(&mut target.height);
        self.waist.apply_to(&mut target.waist);
        self.chest.apply_to(&mut target.chest);
        self.right_arm.apply_to(&mut target.right_arm);
        self.left_arm.apply_to(&mut target.left_arm);
        self.right_leg.apply_to(&mut target.right_leg);
        self.left_leg.apply_to(&mut target.left_leg);
    }
}
