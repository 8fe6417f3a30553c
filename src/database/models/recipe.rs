use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::number::{serialize_whole, Coerced, NumberInput};

pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 180.0..=350.0;
pub const TIME_RANGE: RangeInclusive<f64> = 2.0..=24.0;

/// A persisted recipe document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub ingredient: String,
    #[serde(serialize_with = "serialize_whole")]
    pub temperature: f64,
    #[serde(serialize_with = "serialize_whole")]
    pub time: f64,
    pub fuel: String,
    pub directions: String,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds a fresh document; the owner always comes from the caller's identity.
    pub fn new(fields: RecipeFields, owner: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            ingredient: fields.ingredient,
            temperature: fields.temperature,
            time: fields.time,
            fuel: fields.fuel,
            directions: fields.directions,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn fields(&self) -> RecipeFields {
        RecipeFields {
            ingredient: self.ingredient.clone(),
            temperature: self.temperature,
            time: self.time,
            fuel: self.fuel.clone(),
            directions: self.directions.clone(),
        }
    }

    /// Replaces the user-editable fields. `id`, `owner` and `created_at` never change.
    pub fn apply(&mut self, fields: RecipeFields) {
        self.ingredient = fields.ingredient;
        self.temperature = fields.temperature;
        self.time = fields.time;
        self.fuel = fields.fuel;
        self.directions = fields.directions;
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }
}

/// The user-editable part of a recipe, already checked against every constraint
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeFields {
    pub ingredient: String,
    pub temperature: f64,
    pub time: f64,
    pub fuel: String,
    pub directions: String,
}

/// Recipe fields as submitted by a client, for both create and partial update.
///
/// Anything not listed here (`owner`, `id`, timestamps, unknown keys) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeInput {
    pub ingredient: Option<String>,
    pub temperature: Option<NumberInput>,
    pub time: Option<NumberInput>,
    pub fuel: Option<String>,
    pub directions: Option<String>,
}

/// One or more fields failed validation; maps field name to reason
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("invalid recipe fields: {fields:?}")]
pub struct ValidationError {
    pub fields: BTreeMap<String, String>,
}

impl ValidationError {
    fn add(&mut self, field: &str, reason: impl Into<String>) {
        self.fields.entry(field.to_string()).or_insert_with(|| reason.into());
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl RecipeInput {
    /// Checks a full submission. Every field is required.
    pub fn validate(&self) -> Result<RecipeFields, ValidationError> {
        let mut errors = ValidationError::default();

        let ingredient = required_text(&mut errors, "ingredient", self.ingredient.as_deref());
        let temperature =
            required_number(&mut errors, "temperature", self.temperature.as_ref(), &TEMPERATURE_RANGE);
        let time = required_number(&mut errors, "time", self.time.as_ref(), &TIME_RANGE);
        let fuel = required_text(&mut errors, "fuel", self.fuel.as_deref());
        let directions = required_text(&mut errors, "directions", self.directions.as_deref());

        match (ingredient, temperature, time, fuel, directions) {
            (Some(ingredient), Some(temperature), Some(time), Some(fuel), Some(directions))
                if errors.is_empty() =>
            {
                Ok(RecipeFields { ingredient, temperature, time, fuel, directions })
            }
            _ => Err(errors),
        }
    }

    /// Merges this patch over `current`.
    ///
    /// Absent, null and blank values leave the existing value alone; they never clear a field.
    /// The merged result must still satisfy every constraint.
    pub fn merge_into(&self, current: &RecipeFields) -> Result<RecipeFields, ValidationError> {
        let mut errors = ValidationError::default();

        let merged = RecipeFields {
            ingredient: patched_text(self.ingredient.as_deref(), &current.ingredient),
            temperature: patched_number(&mut errors, "temperature", self.temperature.as_ref(), current.temperature),
            time: patched_number(&mut errors, "time", self.time.as_ref(), current.time),
            fuel: patched_text(self.fuel.as_deref(), &current.fuel),
            directions: patched_text(self.directions.as_deref(), &current.directions),
        };

        check_range(&mut errors, "temperature", merged.temperature, &TEMPERATURE_RANGE);
        check_range(&mut errors, "time", merged.time, &TIME_RANGE);

        if errors.is_empty() {
            Ok(merged)
        } else {
            Err(errors)
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_text(errors: &mut ValidationError, field: &str, value: Option<&str>) -> Option<String> {
    match non_blank(value) {
        Some(v) => Some(v.to_string()),
        None => {
            errors.add(field, "is required");
            None
        }
    }
}

fn required_number(
    errors: &mut ValidationError,
    field: &str,
    value: Option<&NumberInput>,
    range: &RangeInclusive<f64>,
) -> Option<f64> {
    match value.map(NumberInput::coerce) {
        None | Some(Coerced::Missing) => {
            errors.add(field, "is required");
            None
        }
        Some(Coerced::Invalid) => {
            errors.add(field, "must be a number");
            None
        }
        Some(Coerced::Value(n)) => {
            check_range(errors, field, n, range);
            Some(n)
        }
    }
}

fn patched_text(value: Option<&str>, current: &str) -> String {
    non_blank(value).unwrap_or(current).to_string()
}

fn patched_number(errors: &mut ValidationError, field: &str, value: Option<&NumberInput>, current: f64) -> f64 {
    match value.map(NumberInput::coerce) {
        None | Some(Coerced::Missing) => current,
        Some(Coerced::Value(n)) => n,
        Some(Coerced::Invalid) => {
            errors.add(field, "must be a number");
            current
        }
    }
}

fn check_range(errors: &mut ValidationError, field: &str, value: f64, range: &RangeInclusive<f64>) {
    if !range.contains(&value) {
        errors.add(field, format!("must be between {} and {}", range.start(), range.end()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_input() -> RecipeInput {
        serde_json::from_value(json!({
            "ingredient": "Brisket",
            "temperature": 225,
            "time": 12,
            "fuel": "Oak",
            "directions": "Low and slow"
        }))
        .unwrap()
    }

    #[test]
    fn validates_complete_input() {
        let fields = full_input().validate().unwrap();
        assert_eq!(fields.ingredient, "Brisket");
        assert_eq!(fields.temperature, 225.0);
        assert_eq!(fields.time, 12.0);
    }

    #[test]
    fn empty_ingredient_is_rejected() {
        let mut input = full_input();
        input.ingredient = Some(String::new());

        let err = input.validate().unwrap_err();
        assert_eq!(err.fields.get("ingredient").map(String::as_str), Some("is required"));
    }

    #[test]
    fn missing_temperature_is_rejected() {
        let mut input = full_input();
        input.temperature = Some(NumberInput::from(""));
        assert!(input.validate().unwrap_err().fields.contains_key("temperature"));

        input.temperature = None;
        assert!(input.validate().unwrap_err().fields.contains_key("temperature"));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut input = full_input();
        input.temperature = Some(NumberInput::Number(180.0));
        input.time = Some(NumberInput::Number(24.0));
        assert!(input.validate().is_ok());

        input.temperature = Some(NumberInput::Number(351.0));
        input.time = Some(NumberInput::Number(1.5));
        let err = input.validate().unwrap_err();
        assert!(err.fields.contains_key("temperature"));
        assert!(err.fields.contains_key("time"));
    }

    #[test]
    fn reports_every_failing_field() {
        let err = RecipeInput::default().validate().unwrap_err();
        let names: Vec<_> = err.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["directions", "fuel", "ingredient", "temperature", "time"]);
    }

    #[test]
    fn owner_in_body_is_ignored() {
        let input: RecipeInput = serde_json::from_value(json!({
            "ingredient": "Ribs",
            "owner": "someone-else"
        }))
        .unwrap();
        assert_eq!(input.ingredient.as_deref(), Some("Ribs"));
    }

    #[test]
    fn merge_skips_blank_values() {
        let current = full_input().validate().unwrap();
        let patch = RecipeInput {
            ingredient: Some(String::new()),
            temperature: Some(NumberInput::from("")),
            fuel: Some("   ".to_string()),
            ..Default::default()
        };

        assert_eq!(patch.merge_into(&current).unwrap(), current);
    }

    #[test]
    fn merge_overwrites_with_non_empty_values() {
        let current = full_input().validate().unwrap();
        let patch = RecipeInput {
            ingredient: Some("Chicken wings".to_string()),
            temperature: Some(NumberInput::from("275")),
            ..Default::default()
        };

        let merged = patch.merge_into(&current).unwrap();
        assert_eq!(merged.ingredient, "Chicken wings");
        assert_eq!(merged.temperature, 275.0);
        assert_eq!(merged.fuel, current.fuel);

        // same patch again lands on the same state
        assert_eq!(patch.merge_into(&merged).unwrap(), merged);
    }

    #[test]
    fn merge_rejects_out_of_range_values() {
        let current = full_input().validate().unwrap();
        let patch = RecipeInput { temperature: Some(NumberInput::Number(500.0)), ..Default::default() };

        assert!(patch.merge_into(&current).unwrap_err().fields.contains_key("temperature"));
    }

    #[test]
    fn apply_keeps_identity_and_owner() {
        let owner = Uuid::new_v4();
        let mut recipe = Recipe::new(full_input().validate().unwrap(), owner);
        let (id, created_at, updated_at) = (recipe.id, recipe.created_at, recipe.updated_at);
        std::thread::sleep(std::time::Duration::from_millis(2));

        let mut fields = recipe.fields();
        fields.ingredient = "Pork shoulder".to_string();
        recipe.apply(fields);

        assert_eq!(recipe.id, id);
        assert_eq!(recipe.owner, owner);
        assert_eq!(recipe.created_at, created_at);
        assert_eq!(recipe.ingredient, "Pork shoulder");
        assert!(recipe.updated_at > updated_at);
    }
}
