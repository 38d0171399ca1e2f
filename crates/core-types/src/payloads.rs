//! Write-side inputs for the three records.
//!
//! Request bodies deserialize into the loose `*Payload` / `*Patch` types, where
//! every field may be missing. Validation turns a payload into a `New*` value
//! whose required fields are known to be present and non-empty, so the
//! repository never sees an invalid insert.

use crate::error::ValidationError;
use crate::structs::{Mission, Scientist};
use serde::{Deserialize, Deserializer};

fn require_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField { field }),
        Some(text) if text.is_empty() => Err(ValidationError::EmptyField { field }),
        Some(text) => Ok(text),
    }
}

fn require_id(field: &'static str, value: Option<i64>) -> Result<i64, ValidationError> {
    value.ok_or(ValidationError::MissingField { field })
}

/// Distinguishes an omitted key (`None`) from an explicit `null` (`Some(None)`).
fn explicit<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// --- Scientist ---

/// Body of `POST /scientists`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScientistPayload {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

impl ScientistPayload {
    pub fn validate(self) -> Result<NewScientist, ValidationError> {
        NewScientist::new(self.name, self.field_of_study)
    }
}

/// A scientist that has passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScientist {
    name: String,
    field_of_study: String,
}

impl NewScientist {
    pub fn new(
        name: impl Into<Option<String>>,
        field_of_study: impl Into<Option<String>>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", name.into())?,
            field_of_study: require_text("field_of_study", field_of_study.into())?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_of_study(&self) -> &str {
        &self.field_of_study
    }
}

/// Body of `PATCH /scientists/:id`.
///
/// Only `name` and `field_of_study` are updatable; any other key is rejected
/// at deserialization time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScientistPatch {
    #[serde(default, deserialize_with = "explicit")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub field_of_study: Option<Option<String>>,
}

impl ScientistPatch {
    /// Assigns every supplied field onto `scientist`, validating each one.
    /// On error `scientist` may be partially modified and should be discarded.
    pub fn apply_to(self, scientist: &mut Scientist) -> Result<(), ValidationError> {
        if let Some(name) = self.name {
            scientist.name = require_text("name", name)?;
        }
        if let Some(field_of_study) = self.field_of_study {
            scientist.field_of_study = require_text("field_of_study", field_of_study)?;
        }
        Ok(())
    }
}

// --- Planet ---

/// A planet to insert. Nothing about a planet is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewPlanet {
    pub name: Option<String>,
    pub distance_from_earth: Option<i64>,
    pub nearest_star: Option<String>,
}

// --- Mission ---

/// Body of `POST /missions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissionPayload {
    pub name: Option<String>,
    pub planet_id: Option<i64>,
    pub scientist_id: Option<i64>,
}

impl MissionPayload {
    pub fn validate(self) -> Result<NewMission, ValidationError> {
        Ok(NewMission {
            name: require_text("name", self.name)?,
            planet_id: require_id("planet_id", self.planet_id)?,
            scientist_id: require_id("scientist_id", self.scientist_id)?,
        })
    }
}

/// A mission that has passed field validation. Whether the referenced rows
/// exist is only known once the repository checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMission {
    name: String,
    planet_id: i64,
    scientist_id: i64,
}

impl NewMission {
    pub fn new(
        name: impl Into<Option<String>>,
        planet_id: i64,
        scientist_id: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", name.into())?,
            planet_id,
            scientist_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn planet_id(&self) -> i64 {
        self.planet_id
    }

    pub fn scientist_id(&self) -> i64 {
        self.scientist_id
    }
}

/// Partial update of a mission. Same rules as [`ScientistPatch`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissionPatch {
    #[serde(default, deserialize_with = "explicit")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub planet_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "explicit")]
    pub scientist_id: Option<Option<i64>>,
}

impl MissionPatch {
    pub fn apply_to(self, mission: &mut Mission) -> Result<(), ValidationError> {
        if let Some(name) = self.name {
            mission.name = require_text("name", name)?;
        }
        if let Some(planet_id) = self.planet_id {
            mission.planet_id = require_id("planet_id", planet_id)?;
        }
        if let Some(scientist_id) = self.scientist_id {
            mission.scientist_id = require_id("scientist_id", scientist_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ada() -> Scientist {
        Scientist {
            id: 1,
            name: "Ada".to_string(),
            field_of_study: "CS".to_string(),
        }
    }

    #[test]
    fn scientist_payload_requires_both_fields() {
        let payload: ScientistPayload = serde_json::from_value(json!({ "name": "Ada" })).unwrap();
        assert_eq!(
            payload.validate(),
            Err(ValidationError::MissingField { field: "field_of_study" })
        );

        let payload: ScientistPayload =
            serde_json::from_value(json!({ "name": "", "field_of_study": "CS" })).unwrap();
        assert_eq!(
            payload.validate(),
            Err(ValidationError::EmptyField { field: "name" })
        );
    }

    #[test]
    fn valid_scientist_payload() {
        let payload: ScientistPayload =
            serde_json::from_value(json!({ "name": "Ada", "field_of_study": "CS" })).unwrap();
        let new = payload.validate().unwrap();
        assert_eq!(new.name(), "Ada");
        assert_eq!(new.field_of_study(), "CS");
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let patch: ScientistPatch =
            serde_json::from_value(json!({ "field_of_study": "Physics" })).unwrap();
        let mut scientist = ada();
        patch.apply_to(&mut scientist).unwrap();
        assert_eq!(scientist.name, "Ada");
        assert_eq!(scientist.field_of_study, "Physics");
    }

    #[test]
    fn patch_rejects_explicit_null_and_empty() {
        let patch: ScientistPatch = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!(
            patch.apply_to(&mut ada()),
            Err(ValidationError::MissingField { field: "name" })
        );

        let patch: ScientistPatch =
            serde_json::from_value(json!({ "field_of_study": "" })).unwrap();
        assert_eq!(
            patch.apply_to(&mut ada()),
            Err(ValidationError::EmptyField { field: "field_of_study" })
        );
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        let result = serde_json::from_value::<ScientistPatch>(json!({ "id": 7 }));
        assert!(result.is_err());

        let result = serde_json::from_value::<MissionPatch>(json!({ "planet": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn mission_payload_requires_integer_ids() {
        let result = serde_json::from_value::<MissionPayload>(
            json!({ "name": "Probe", "planet_id": "one", "scientist_id": 1 }),
        );
        assert!(result.is_err());

        let payload: MissionPayload =
            serde_json::from_value(json!({ "name": "Probe", "scientist_id": 1 })).unwrap();
        assert_eq!(
            payload.validate(),
            Err(ValidationError::MissingField { field: "planet_id" })
        );
    }

    #[test]
    fn mission_patch_rejects_null_foreign_key() {
        let mut mission = Mission {
            id: 1,
            name: "Probe".to_string(),
            planet_id: 1,
            scientist_id: 1,
        };
        let patch: MissionPatch = serde_json::from_value(json!({ "planet_id": null })).unwrap();
        assert_eq!(
            patch.apply_to(&mut mission),
            Err(ValidationError::MissingField { field: "planet_id" })
        );

        let patch: MissionPatch =
            serde_json::from_value(json!({ "name": "Lander", "scientist_id": 2 })).unwrap();
        patch.apply_to(&mut mission).unwrap();
        assert_eq!(mission.name, "Lander");
        assert_eq!(mission.planet_id, 1);
        assert_eq!(mission.scientist_id, 2);
    }
}
