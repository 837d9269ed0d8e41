use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub repetitions: i32,
    #[serde(default)]
    pub sets: i32,
    /// minutes
    #[serde(default)]
    pub duration: i32,
}

/// Training routine embedded in a progress record. Exercise order is preserved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Routine {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Routine {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("routine name cannot be empty".into()));
        }
        for (idx, ex) in self.exercises.iter().enumerate() {
            if ex.name.trim().is_empty() {
                return Err(ModelError::Validation(format!("exercise #{idx} has no name")));
            }
            if ex.repetitions < 0 || ex.sets < 0 || ex.duration < 0 {
                return Err(ModelError::Validation(format!("exercise '{}' has negative values", ex.name)));
            }
        }
        Ok(())
    }
}

/// Body measurements in kg / cm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(default)]
pub struct Measurements {
    pub weight: f64,
    pub height: f64,
    pub waist: f64,
    pub chest: f64,
    pub right_arm: f64,
    pub left_arm: f64,
    pub right_leg: f64,
    pub left_leg: f64,
}

impl Measurements {
    pub fn validate(&self) -> Result<(), ModelError> {
        let fields = [
            ("weight", self.weight),
            ("height", self.height),
            ("waist", self.waist),
            ("chest", self.chest),
            ("right_arm", self.right_arm),
            ("left_arm", self.left_arm),
            ("right_leg", self.right_leg),
            ("left_leg", self.left_leg),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            Some((name, v)) => Err(ModelError::Validation(format!("measurement {name} must be >= 0, got {v}"))),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "physical_progress")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub routine: Option<Routine>,
    #[sea_orm(column_type = "JsonBinary")]
    pub measurements: Measurements,
    #[sea_orm(column_type = "Text", nullable)]
    pub goal: Option<String>,
    pub registration_date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
