//! Dataset entity

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "datasets")]
pub struct Model {
    /// Assigned by the database on insert, never reused
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub records: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A dataset that has not been stored yet
///
/// Inbound payloads may carry an `id`; it is ignored. Missing text fields
/// deserialize as empty strings so that validation, not the JSON decoder,
/// decides what a blank record means.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewDataset {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,

    pub records: i32,
}

impl NewDataset {
    pub fn new(name: impl Into<String>, description: impl Into<String>, records: i32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            records,
        }
    }

    /// Active model with the id left for the database to fill in
    pub fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            records: Set(self.records),
            ..Default::default()
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        let dataset = Model {
            id: 7,
            name: "Claims".into(),
            description: "Monthly claims extract".into(),
            records: 1200,
        };

        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "Claims",
                "description": "Monthly claims extract",
                "records": 1200
            })
        );

        let back: Model = serde_json::from_value(json).unwrap();
        assert_eq!(back, dataset);
    }

    #[test]
    fn test_new_dataset_ignores_id_and_fills_defaults() {
        let parsed: NewDataset =
            serde_json::from_str(r#"{"id": 99, "name": "A", "unknown": true}"#).unwrap();
        assert_eq!(parsed, NewDataset::new("A", "", 0));
    }

    #[test]
    fn test_blank_fields_fail_validation() {
        assert!(NewDataset::new("A", "a", 5).validate().is_ok());
        assert!(NewDataset::new("A", "a", -3).validate().is_ok());

        let errors = NewDataset::new("  ", "", 0).validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields["name"][0].message.as_deref(),
            Some("Name is required")
        );
        assert_eq!(
            fields["description"][0].message.as_deref(),
            Some("Description is required")
        );
    }

    #[test]
    fn test_active_model_leaves_id_unset() {
        let active = NewDataset::new("A", "a", 1).to_active_model();
        assert!(active.id.is_not_set());
        assert_eq!(active.records, Set(1));
    }
}
