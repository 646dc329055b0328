//! Car entity model and DTOs.
//!
//! One shape serves both the `classic_cars` and `remote_cars` tables.

use carlot_core::car::validate_car;
use carlot_core::cost::{Cost, CostError};
use carlot_core::types::{DbId, Timestamp};
use carlot_core::validation::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A car row.
///
/// `id`, `created_at` and `version` are assigned by the database. The JSON
/// form never includes `created_at` and leaves out `year`, `cost` and
/// `description` while they hold their zero value.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Car {
    pub id: DbId,
    #[serde(skip)]
    pub created_at: Timestamp,
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub year: i32,
    #[sqlx(try_from = "i32")]
    #[serde(skip_serializing_if = "Cost::is_zero")]
    pub cost: Cost,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub version: i32,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl Car {
    /// An unsaved car. Server-assigned fields stay zeroed until insert.
    pub fn new(
        name: impl Into<String>,
        year: i32,
        cost: Cost,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            created_at: Timestamp::default(),
            name: name.into(),
            year,
            cost,
            description: description.into(),
            version: 0,
        }
    }

    /// Record every rule violation for the user-supplied fields.
    pub fn validate(&self, v: &mut Validator) {
        validate_car(v, &self.name, self.year, self.cost);
    }
}

/// DTO for creating a car. Missing fields default to zero values and are
/// then rejected by validation.
///
/// `cost` is kept as the raw JSON value and decoded on conversion, so a
/// malformed cost surfaces as [`CostError`] rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateCar {
    pub name: String,
    pub year: i32,
    pub cost: Option<Value>,
    pub description: String,
}

impl TryFrom<CreateCar> for Car {
    type Error = CostError;

    fn try_from(input: CreateCar) -> Result<Self, Self::Error> {
        let cost = decode_cost(input.cost.as_ref())?.unwrap_or_default();
        Ok(Car::new(input.name, input.year, cost, input.description))
    }
}

/// DTO for a partial update. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCar {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub cost: Option<Value>,
    pub description: Option<String>,
}

impl UpdateCar {
    /// Overwrite the fields of `car` that are present in this update.
    ///
    /// `car` is left untouched if the cost fails to decode.
    pub fn apply_to(self, car: &mut Car) -> Result<(), CostError> {
        let cost = decode_cost(self.cost.as_ref())?;
        if let Some(name) = self.name {
            car.name = name;
        }
        if let Some(year) = self.year {
            car.year = year;
        }
        if let Some(cost) = cost {
            car.cost = cost;
        }
        if let Some(description) = self.description {
            car.description = description;
        }
        Ok(())
    }
}

fn decode_cost(raw: Option<&Value>) -> Result<Option<Cost>, CostError> {
    raw.map(|value| Cost::decode(&value.to_string())).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn saved(description: &str) -> Car {
        Car {
            id: 7,
            created_at: chrono::Utc::now(),
            version: 3,
            ..Car::new("Jaguar E-Type", 1961, Cost::new(150_000), description)
        }
    }

    #[test]
    fn serializes_wire_fields_only() {
        let value = serde_json::to_value(saved("Series 1")).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "Jaguar E-Type",
                "year": 1961,
                "cost": "150000 dollars",
                "description": "Series 1",
                "version": 3,
            })
        );
    }

    #[test]
    fn omits_zero_valued_fields() {
        let car = Car {
            year: 0,
            cost: Cost::default(),
            ..saved("")
        };
        let value = serde_json::to_value(car).unwrap();
        assert_eq!(value, json!({"id": 7, "name": "Jaguar E-Type", "version": 3}));
    }

    #[test]
    fn create_defaults_missing_fields() {
        let input: CreateCar = serde_json::from_value(json!({"name": "Mini"})).unwrap();
        let car = Car::try_from(input).unwrap();
        assert_eq!(car.year, 0);
        assert!(car.cost.is_zero());
        assert_eq!(car.description, "");
    }

    #[test]
    fn create_rejects_unknown_fields() {
        let result = serde_json::from_value::<CreateCar>(json!({"name": "Mini", "id": 5}));
        assert!(result.is_err());
    }

    #[test]
    fn create_decodes_cost_text() {
        let input: CreateCar =
            serde_json::from_value(json!({"name": "Mini", "cost": "4500 dollars"})).unwrap();
        assert_eq!(Car::try_from(input).unwrap().cost, Cost::new(4500));
    }

    #[test]
    fn create_rejects_malformed_cost() {
        for cost in [json!("100 dollar"), json!(100), json!(["1 dollars"])] {
            let input: CreateCar = serde_json::from_value(json!({ "cost": cost })).unwrap();
            assert_matches!(Car::try_from(input), Err(CostError), "cost {cost}");
        }
    }

    #[test]
    fn update_applies_present_fields_only() {
        let mut car = saved("Series 1");
        let patch: UpdateCar =
            serde_json::from_value(json!({"cost": "99000 dollars", "description": ""})).unwrap();
        patch.apply_to(&mut car).unwrap();

        assert_eq!(car.name, "Jaguar E-Type");
        assert_eq!(car.year, 1961);
        assert_eq!(car.cost, Cost::new(99_000));
        assert_eq!(car.description, "");
        assert_eq!(car.version, 3);
    }

    #[test]
    fn update_with_malformed_cost_changes_nothing() {
        let mut car = saved("Series 1");
        let patch: UpdateCar =
            serde_json::from_value(json!({"name": "E-Type V12", "cost": "lots"})).unwrap();

        assert_matches!(patch.apply_to(&mut car), Err(CostError));
        assert_eq!(car.name, "Jaguar E-Type");
        assert_eq!(car.cost, Cost::new(150_000));
    }

    #[test]
    fn validate_delegates_to_field_rules() {
        let mut v = Validator::new();
        Car::new("", 1961, Cost::new(-1), "").validate(&mut v);
        assert_eq!(v.errors().get("name"), Some("must be provided"));
        assert_eq!(v.errors().get("cost"), Some("must be a positive integer"));
        assert_eq!(v.errors().get("year"), None);
    }
}
