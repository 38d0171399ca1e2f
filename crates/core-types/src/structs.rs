use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `scientists` table.
///
/// Serialized on its own this is the reduced shape used by list endpoints:
/// `{id, name, field_of_study}`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Scientist {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
}

/// A row from the `planets` table. Every descriptive column is nullable.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Planet {
    pub id: i64,
    pub name: Option<String>,
    pub distance_from_earth: Option<i64>,
    pub nearest_star: Option<String>,
}

/// A row from the `missions` table, the join between one scientist and one planet.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    pub name: String,
    pub planet_id: i64,
    pub scientist_id: i64,
}
