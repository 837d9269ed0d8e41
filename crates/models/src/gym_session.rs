use chrono::{NaiveDate, NaiveTime};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Per-slot attendance marks recorded by the coach, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Attendance(pub Vec<bool>);

impl Attendance {
    pub fn present(&self) -> usize {
        self.0.iter().filter(|p| **p).count()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gym_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub coach_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i32,
    pub current_reservations: i32,
    #[sea_orm(column_type = "JsonBinary")]
    #[serde(default)]
    pub attendance: Attendance,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Schedule and capacity rules every stored session satisfies.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_schedule(self.start_time, self.end_time)?;
        validate_capacity(self.capacity, self.current_reservations)?;
        if self.attendance.0.len() > self.capacity as usize {
            return Err(ModelError::Validation(format!(
                "attendance has {} marks but capacity is {}",
                self.attendance.0.len(),
                self.capacity
            )));
        }
        Ok(())
    }
}

pub fn validate_schedule(start: NaiveTime, end: NaiveTime) -> Result<(), ModelError> {
    if start >= end {
        return Err(ModelError::Validation(format!("start time {start} must be before end time {end}")));
    }
    Ok(())
}

pub fn validate_capacity(capacity: i32, current_reservations: i32) -> Result<(), ModelError> {
    if capacity <= 0 {
        return Err(ModelError::Validation("capacity must be positive".into()));
    }
    if !(0..=capacity).contains(&current_reservations) {
        return Err(ModelError::Validation(format!(
            "current reservations {current_reservations} outside [0, {capacity}]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, 0, 0).unwrap() }

    #[test]
    fn schedule_requires_start_before_end() {
        assert!(validate_schedule(t(10), t(12)).is_ok());
        assert!(validate_schedule(t(12), t(12)).is_err());
        assert!(validate_schedule(t(13), t(12)).is_err());
    }

    #[test]
    fn capacity_bounds() {
        assert!(validate_capacity(20, 0).is_ok());
        assert!(validate_capacity(20, 20).is_ok());
        assert!(validate_capacity(20, 21).is_err());
        assert!(validate_capacity(20, -1).is_err());
        assert!(validate_capacity(0, 0).is_err());
    }

    #[test]
    fn attendance_is_plain_json_array() {
        let a = Attendance(vec![true, false, true]);
        assert_eq!(serde_json::to_string(&a).unwrap(), "[true,false,true]");
        assert_eq!(a.present(), 2);
    }

    #[test]
    fn attendance_binds_as_json_column_value() {
        let v: sea_orm::Value = Attendance(vec![true, false]).into();
        match v {
            sea_orm::Value::Json(Some(json)) => assert_eq!(*json, serde_json::json!([true, false])),
            other => panic!("unexpected value: {other:?}"),
        }
    }
}
