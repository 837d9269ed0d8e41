use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// One line of a report: a session label and its metrics (e.g. `"attendance": 5`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub session: String,
    #[serde(default)]
    pub metrics: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct ReportEntries(pub Vec<ReportEntry>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub coach_id: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub generated_at: NaiveDate,
    #[sea_orm(column_type = "JsonBinary")]
    #[serde(default)]
    pub entries: ReportEntries,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_metric_values_verbatim() {
        let raw = r#"[{"session":"Session 1","metrics":{"attendance":5,"goals_met":true}}]"#;
        let entries: ReportEntries = serde_json::from_str(raw).unwrap();
        assert_eq!(entries.0.len(), 1);
        assert_eq!(entries.0[0].metrics["attendance"], 5);
        assert_eq!(entries.0[0].metrics["goals_met"], true);
        assert_eq!(serde_json::to_string(&entries).unwrap(), raw);
    }
}
