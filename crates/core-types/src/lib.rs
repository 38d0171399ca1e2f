pub mod error;
pub mod payloads;
pub mod structs;
pub mod views;

// Re-export the core types to provide a clean public API.
pub use error::ValidationError;
pub use payloads::{
    MissionPatch, MissionPayload, NewMission, NewPlanet, NewScientist, ScientistPatch,
    ScientistPayload,
};
pub use structs::{Mission, Planet, Scientist};
pub use views::{MissionDetail, MissionForPlanet, MissionForScientist, PlanetDetail, ScientistDetail};
