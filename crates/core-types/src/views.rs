//! Serialized shapes returned by the API.
//!
//! Nested records never point back at their parent: a scientist's missions
//! carry the planet but not the scientist, a planet's missions carry the
//! scientist but not the planet, and the embedded records never list their
//! own missions.

use crate::structs::{Mission, Planet, Scientist};
use serde::Serialize;

/// A scientist with every mission they fly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScientistDetail {
    #[serde(flatten)]
    pub scientist: Scientist,
    pub missions: Vec<MissionForScientist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionForScientist {
    #[serde(flatten)]
    pub mission: Mission,
    pub planet: Planet,
}

/// A planet with every mission sent to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanetDetail {
    #[serde(flatten)]
    pub planet: Planet,
    pub missions: Vec<MissionForPlanet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionForPlanet {
    #[serde(flatten)]
    pub mission: Mission,
    pub scientist: Scientist,
}

/// A mission with both ends of the relationship embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionDetail {
    #[serde(flatten)]
    pub mission: Mission,
    pub planet: Planet,
    pub scientist: Scientist,
}
