use crate::DbError;
use core_types::{
    Mission, MissionDetail, MissionForPlanet, MissionForScientist, MissionPatch, NewMission,
    NewPlanet, NewScientist, Planet, PlanetDetail, Scientist, ScientistDetail, ScientistPatch,
};
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqliteRow};
use sqlx::Row;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Every mutation runs in its own transaction; a failed mutation leaves the
/// database untouched.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==========================================================================
    // Scientists
    // ==========================================================================

    /// Fetches every scientist, without their missions.
    pub async fn list_scientists(&self) -> Result<Vec<Scientist>, DbError> {
        let scientists = sqlx::query_as::<_, Scientist>(
            "SELECT id, name, field_of_study FROM scientists ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(scientists)
    }

    /// Fetches one scientist together with their missions and the planet of each.
    pub async fn get_scientist(&self, id: i64) -> Result<ScientistDetail, DbError> {
        let mut conn = self.pool.acquire().await?;
        let scientist = fetch_scientist(&mut conn, id).await?.ok_or(DbError::NotFound)?;
        scientist_detail(&mut conn, scientist).await
    }

    /// Reports whether a scientist row exists, without loading their missions.
    pub async fn scientist_exists(&self, id: i64) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM scientists WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create_scientist(&self, new: &NewScientist) -> Result<ScientistDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query("INSERT INTO scientists (name, field_of_study) VALUES (?, ?)")
            .bind(new.name())
            .bind(new.field_of_study())
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?
            .last_insert_rowid();

        tx.commit().await?;
        tracing::debug!(id, "Scientist created.");

        Ok(ScientistDetail {
            scientist: Scientist {
                id,
                name: new.name().to_string(),
                field_of_study: new.field_of_study().to_string(),
            },
            missions: Vec::new(),
        })
    }

    /// Applies a partial update. Returns `NotFound` before validating anything
    /// if the scientist does not exist.
    pub async fn update_scientist(
        &self,
        id: i64,
        patch: ScientistPatch,
    ) -> Result<ScientistDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut scientist = fetch_scientist(&mut tx, id).await?.ok_or(DbError::NotFound)?;
        patch.apply_to(&mut scientist)?;

        sqlx::query("UPDATE scientists SET name = ?, field_of_study = ? WHERE id = ?")
            .bind(&scientist.name)
            .bind(&scientist.field_of_study)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?;

        let detail = scientist_detail(&mut tx, scientist).await?;
        tx.commit().await?;
        Ok(detail)
    }

    /// Deletes a scientist and every mission they fly, returning the number of
    /// missions removed.
    pub async fn delete_scientist(&self, id: i64) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let missions = sqlx::query("DELETE FROM missions WHERE scientist_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM scientists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?
            .rows_affected();

        // Dropping `tx` here rolls the mission deletes back.
        if deleted == 0 {
            return Err(DbError::NotFound);
        }

        tx.commit().await?;
        tracing::debug!(id, missions, "Scientist deleted.");
        Ok(missions)
    }

    // ==========================================================================
    // Planets
    // ==========================================================================

    /// Fetches every planet, without their missions.
    pub async fn list_planets(&self) -> Result<Vec<Planet>, DbError> {
        let planets = sqlx::query_as::<_, Planet>(
            "SELECT id, name, distance_from_earth, nearest_star FROM planets ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(planets)
    }

    /// Fetches one planet together with its missions and the scientist of each.
    pub async fn get_planet(&self, id: i64) -> Result<PlanetDetail, DbError> {
        let mut conn = self.pool.acquire().await?;
        let planet = fetch_planet(&mut conn, id).await?.ok_or(DbError::NotFound)?;

        let missions = sqlx::query(
            r#"
            SELECT
                m.id, m.name, m.planet_id, m.scientist_id,
                s.name AS scientist_name, s.field_of_study
            FROM
                missions AS m
            JOIN
                scientists AS s ON s.id = m.scientist_id
            WHERE
                m.planet_id = ?
            ORDER BY
                m.id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(|row| -> Result<MissionForPlanet, sqlx::Error> {
            let mission = mission_from_row(row)?;
            let scientist = Scientist {
                id: mission.scientist_id,
                name: row.try_get("scientist_name")?,
                field_of_study: row.try_get("field_of_study")?,
            };
            Ok(MissionForPlanet { mission, scientist })
        })
        .collect::<Result<Vec<_>, _>>()?;

        Ok(PlanetDetail { planet, missions })
    }

    pub async fn create_planet(&self, new: &NewPlanet) -> Result<Planet, DbError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            "INSERT INTO planets (name, distance_from_earth, nearest_star) VALUES (?, ?, ?)",
        )
        .bind(new.name.as_deref())
        .bind(new.distance_from_earth)
        .bind(new.nearest_star.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(DbError::from_write)?
        .last_insert_rowid();

        tx.commit().await?;
        tracing::debug!(id, "Planet created.");

        Ok(Planet {
            id,
            name: new.name.clone(),
            distance_from_earth: new.distance_from_earth,
            nearest_star: new.nearest_star.clone(),
        })
    }

    /// Deletes a planet and every mission sent to it, returning the number of
    /// missions removed.
    pub async fn delete_planet(&self, id: i64) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let missions = sqlx::query("DELETE FROM missions WHERE planet_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM planets WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::NotFound);
        }

        tx.commit().await?;
        tracing::debug!(id, missions, "Planet deleted.");
        Ok(missions)
    }

    // ==========================================================================
    // Missions
    // ==========================================================================

    pub async fn list_missions(&self) -> Result<Vec<Mission>, DbError> {
        let missions = sqlx::query_as::<_, Mission>(
            "SELECT id, name, planet_id, scientist_id FROM missions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(missions)
    }

    pub async fn get_mission(&self, id: i64) -> Result<MissionDetail, DbError> {
        let mut conn = self.pool.acquire().await?;
        let mission = fetch_mission(&mut conn, id).await?.ok_or(DbError::NotFound)?;
        mission_detail(&mut conn, mission).await
    }

    /// Inserts a mission after checking that both the planet and the scientist
    /// exist. A dangling reference is reported as `Constraint`.
    pub async fn create_mission(&self, new: &NewMission) -> Result<MissionDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let (planet, scientist) =
            resolve_ends(&mut tx, new.planet_id(), new.scientist_id()).await?;

        let id = sqlx::query("INSERT INTO missions (name, planet_id, scientist_id) VALUES (?, ?, ?)")
            .bind(new.name())
            .bind(new.planet_id())
            .bind(new.scientist_id())
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?
            .last_insert_rowid();

        tx.commit().await?;
        tracing::debug!(id, "Mission created.");

        Ok(MissionDetail {
            mission: Mission {
                id,
                name: new.name().to_string(),
                planet_id: new.planet_id(),
                scientist_id: new.scientist_id(),
            },
            planet,
            scientist,
        })
    }

    /// Applies a partial update, re-checking any foreign key it changes.
    pub async fn update_mission(
        &self,
        id: i64,
        patch: MissionPatch,
    ) -> Result<MissionDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut mission = fetch_mission(&mut tx, id).await?.ok_or(DbError::NotFound)?;
        patch.apply_to(&mut mission)?;
        let detail = mission_detail(&mut tx, mission).await?;

        sqlx::query("UPDATE missions SET name = ?, planet_id = ?, scientist_id = ? WHERE id = ?")
            .bind(&detail.mission.name)
            .bind(detail.mission.planet_id)
            .bind(detail.mission.scientist_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?;

        tx.commit().await?;
        Ok(detail)
    }

    pub async fn delete_mission(&self, id: i64) -> Result<(), DbError> {
        let deleted = sqlx::query("DELETE FROM missions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from_write)?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    // ==========================================================================
    // Maintenance
    // ==========================================================================

    /// Removes every row from all three tables in one transaction.
    pub async fn clear_all(&self) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        for table in ["missions", "scientists", "planets"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

// ==============================================================================
// Row helpers shared by pooled connections and transactions
// ==============================================================================

async fn fetch_scientist(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Scientist>, DbError> {
    let scientist = sqlx::query_as::<_, Scientist>(
        "SELECT id, name, field_of_study FROM scientists WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(scientist)
}

async fn fetch_planet(conn: &mut SqliteConnection, id: i64) -> Result<Option<Planet>, DbError> {
    let planet = sqlx::query_as::<_, Planet>(
        "SELECT id, name, distance_from_earth, nearest_star FROM planets WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(planet)
}

async fn fetch_mission(conn: &mut SqliteConnection, id: i64) -> Result<Option<Mission>, DbError> {
    let mission = sqlx::query_as::<_, Mission>(
        "SELECT id, name, planet_id, scientist_id FROM missions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(mission)
}

fn mission_from_row(row: &SqliteRow) -> Result<Mission, sqlx::Error> {
    Ok(Mission {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        planet_id: row.try_get("planet_id")?,
        scientist_id: row.try_get("scientist_id")?,
    })
}

async fn scientist_detail(
    conn: &mut SqliteConnection,
    scientist: Scientist,
) -> Result<ScientistDetail, DbError> {
    let missions = sqlx::query(
        r#"
        SELECT
            m.id, m.name, m.planet_id, m.scientist_id,
            p.name AS planet_name, p.distance_from_earth, p.nearest_star
        FROM
            missions AS m
        JOIN
            planets AS p ON p.id = m.planet_id
        WHERE
            m.scientist_id = ?
        ORDER BY
            m.id ASC
        "#,
    )
    .bind(scientist.id)
    .fetch_all(&mut *conn)
    .await?
    .iter()
    .map(|row| -> Result<MissionForScientist, sqlx::Error> {
        let mission = mission_from_row(row)?;
        let planet = Planet {
            id: mission.planet_id,
            name: row.try_get("planet_name")?,
            distance_from_earth: row.try_get("distance_from_earth")?,
            nearest_star: row.try_get("nearest_star")?,
        };
        Ok(MissionForScientist { mission, planet })
    })
    .collect::<Result<Vec<_>, _>>()?;

    Ok(ScientistDetail { scientist, missions })
}

/// Looks up both ends of a mission. A missing row means the mission would
/// point at nothing, which is reported as a constraint violation.
async fn resolve_ends(
    conn: &mut SqliteConnection,
    planet_id: i64,
    scientist_id: i64,
) -> Result<(Planet, Scientist), DbError> {
    let planet = fetch_planet(conn, planet_id)
        .await?
        .ok_or_else(|| DbError::Constraint(format!("planet {planet_id} does not exist")))?;
    let scientist = fetch_scientist(conn, scientist_id)
        .await?
        .ok_or_else(|| DbError::Constraint(format!("scientist {scientist_id} does not exist")))?;
    Ok((planet, scientist))
}

async fn mission_detail(
    conn: &mut SqliteConnection,
    mission: Mission,
) -> Result<MissionDetail, DbError> {
    let (planet, scientist) = resolve_ends(conn, mission.planet_id, mission.scientist_id).await?;
    Ok(MissionDetail {
        mission,
        planet,
        scientist,
    })
}
