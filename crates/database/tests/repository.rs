use configuration::DatabaseSettings;
use core_types::{MissionPatch, NewMission, NewPlanet, NewScientist, ScientistPatch};
use database::{connect, run_migrations, DbError, DbRepository};
use pretty_assertions::assert_eq;

async fn repository() -> DbRepository {
    let pool = connect(&DatabaseSettings::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    DbRepository::new(pool)
}

fn scientist(name: &str, field: &str) -> NewScientist {
    NewScientist::new(name.to_string(), field.to_string()).unwrap()
}

fn planet(name: &str) -> NewPlanet {
    NewPlanet {
        name: Some(name.to_string()),
        distance_from_earth: Some(1_000),
        nearest_star: Some("Sol".to_string()),
    }
}

#[tokio::test]
async fn scientist_round_trip() {
    let repo = repository().await;

    let created = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
    assert!(created.missions.is_empty());

    let fetched = repo.get_scientist(created.scientist.id).await.unwrap();
    assert_eq!(fetched, created);

    let all = repo.list_scientists().await.unwrap();
    assert_eq!(all, vec![created.scientist]);
}

#[tokio::test]
async fn scientist_exists_tracks_the_row() {
    let repo = repository().await;
    assert!(!repo.scientist_exists(1).await.unwrap());

    let created = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
    let id = created.scientist.id;
    assert!(repo.scientist_exists(id).await.unwrap());
    assert!(!repo.scientist_exists(id + 1).await.unwrap());

    repo.delete_scientist(id).await.unwrap();
    assert!(!repo.scientist_exists(id).await.unwrap());
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let repo = repository().await;

    assert!(matches!(repo.get_scientist(42).await, Err(DbError::NotFound)));
    assert!(matches!(repo.get_planet(42).await, Err(DbError::NotFound)));
    assert!(matches!(repo.get_mission(42).await, Err(DbError::NotFound)));
    assert!(matches!(repo.delete_scientist(42).await, Err(DbError::NotFound)));
    assert!(matches!(repo.delete_planet(42).await, Err(DbError::NotFound)));
    assert!(matches!(repo.delete_mission(42).await, Err(DbError::NotFound)));
    assert!(matches!(
        repo.update_scientist(42, ScientistPatch::default()).await,
        Err(DbError::NotFound)
    ));
}

#[tokio::test]
async fn update_scientist_changes_only_supplied_fields() {
    let repo = repository().await;
    let created = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();

    let patch = ScientistPatch {
        field_of_study: Some(Some("Physics".to_string())),
        ..Default::default()
    };
    let updated = repo.update_scientist(created.scientist.id, patch).await.unwrap();
    assert_eq!(updated.scientist.name, "Ada");
    assert_eq!(updated.scientist.field_of_study, "Physics");

    let fetched = repo.get_scientist(created.scientist.id).await.unwrap();
    assert_eq!(fetched.scientist.field_of_study, "Physics");
}

#[tokio::test]
async fn invalid_update_leaves_row_unchanged() {
    let repo = repository().await;
    let created = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();

    let patch = ScientistPatch {
        name: Some(Some(String::new())),
        ..Default::default()
    };
    let result = repo.update_scientist(created.scientist.id, patch).await;
    assert!(matches!(result, Err(DbError::Validation(_))));

    let fetched = repo.get_scientist(created.scientist.id).await.unwrap();
    assert_eq!(fetched.scientist.name, "Ada");
}

#[tokio::test]
async fn mission_requires_existing_planet_and_scientist() {
    let repo = repository().await;
    let ada = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
    let mars = repo.create_planet(&planet("Mars")).await.unwrap();

    let dangling_planet = NewMission::new("Probe".to_string(), mars.id + 100, ada.scientist.id).unwrap();
    assert!(matches!(
        repo.create_mission(&dangling_planet).await,
        Err(DbError::Constraint(_))
    ));

    let dangling_scientist = NewMission::new("Probe".to_string(), mars.id, ada.scientist.id + 100).unwrap();
    assert!(matches!(
        repo.create_mission(&dangling_scientist).await,
        Err(DbError::Constraint(_))
    ));

    assert!(repo.list_missions().await.unwrap().is_empty());
}

#[tokio::test]
async fn mission_detail_embeds_both_ends() {
    let repo = repository().await;
    let ada = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
    let mars = repo.create_planet(&planet("Mars")).await.unwrap();

    let created = repo
        .create_mission(&NewMission::new("Red Dust".to_string(), mars.id, ada.scientist.id).unwrap())
        .await
        .unwrap();
    assert_eq!(created.planet, mars);
    assert_eq!(created.scientist, ada.scientist);

    let fetched = repo.get_mission(created.mission.id).await.unwrap();
    assert_eq!(fetched, created);

    let ada_detail = repo.get_scientist(ada.scientist.id).await.unwrap();
    assert_eq!(ada_detail.missions.len(), 1);
    assert_eq!(ada_detail.missions[0].planet, mars);

    let mars_detail = repo.get_planet(mars.id).await.unwrap();
    assert_eq!(mars_detail.missions.len(), 1);
    assert_eq!(mars_detail.missions[0].scientist, ada.scientist);
}

#[tokio::test]
async fn duplicate_missions_between_same_pair_are_allowed() {
    let repo = repository().await;
    let ada = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
    let mars = repo.create_planet(&planet("Mars")).await.unwrap();

    for _ in 0..2 {
        repo.create_mission(&NewMission::new("Again".to_string(), mars.id, ada.scientist.id).unwrap())
            .await
            .unwrap();
    }
    assert_eq!(repo.list_missions().await.unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_scientist_cascades_to_missions() {
    for count in 0..4 {
        let repo = repository().await;
        let ada = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
        let grace = repo.create_scientist(&scientist("Grace", "Navy")).await.unwrap();
        let mars = repo.create_planet(&planet("Mars")).await.unwrap();

        for i in 0..count {
            repo.create_mission(&NewMission::new(format!("M{i}"), mars.id, ada.scientist.id).unwrap())
                .await
                .unwrap();
        }
        let kept = repo
            .create_mission(&NewMission::new("Kept".to_string(), mars.id, grace.scientist.id).unwrap())
            .await
            .unwrap();

        let removed = repo.delete_scientist(ada.scientist.id).await.unwrap();
        assert_eq!(removed, count);

        let remaining = repo.list_missions().await.unwrap();
        assert_eq!(remaining, vec![kept.mission]);
        assert!(matches!(repo.get_scientist(ada.scientist.id).await, Err(DbError::NotFound)));
    }
}

#[tokio::test]
async fn deleting_planet_cascades_to_missions() {
    let repo = repository().await;
    let ada = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
    let mars = repo.create_planet(&planet("Mars")).await.unwrap();
    let venus = repo.create_planet(&planet("Venus")).await.unwrap();

    repo.create_mission(&NewMission::new("Red".to_string(), mars.id, ada.scientist.id).unwrap())
        .await
        .unwrap();
    repo.create_mission(&NewMission::new("Yellow".to_string(), venus.id, ada.scientist.id).unwrap())
        .await
        .unwrap();

    assert_eq!(repo.delete_planet(mars.id).await.unwrap(), 1);

    let missions = repo.list_missions().await.unwrap();
    assert_eq!(missions.len(), 1);
    assert_eq!(missions[0].planet_id, venus.id);
    assert_eq!(repo.list_planets().await.unwrap(), vec![venus]);
}

#[tokio::test]
async fn update_mission_rechecks_foreign_keys() {
    let repo = repository().await;
    let ada = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
    let mars = repo.create_planet(&planet("Mars")).await.unwrap();
    let venus = repo.create_planet(&planet("Venus")).await.unwrap();
    let created = repo
        .create_mission(&NewMission::new("Hop".to_string(), mars.id, ada.scientist.id).unwrap())
        .await
        .unwrap();
    let id = created.mission.id;

    let dangling = MissionPatch {
        planet_id: Some(Some(venus.id + 100)),
        ..Default::default()
    };
    assert!(matches!(repo.update_mission(id, dangling).await, Err(DbError::Constraint(_))));

    let moved = MissionPatch {
        planet_id: Some(Some(venus.id)),
        ..Default::default()
    };
    let updated = repo.update_mission(id, moved).await.unwrap();
    assert_eq!(updated.planet, venus);
    assert_eq!(updated.mission.name, "Hop");

    repo.delete_mission(id).await.unwrap();
    assert!(repo.list_missions().await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_all_empties_every_table() {
    let repo = repository().await;
    let ada = repo.create_scientist(&scientist("Ada", "CS")).await.unwrap();
    let mars = repo.create_planet(&planet("Mars")).await.unwrap();
    repo.create_mission(&NewMission::new("Hop".to_string(), mars.id, ada.scientist.id).unwrap())
        .await
        .unwrap();

    repo.clear_all().await.unwrap();

    assert!(repo.list_missions().await.unwrap().is_empty());
    assert!(repo.list_scientists().await.unwrap().is_empty());
    assert!(repo.list_planets().await.unwrap().is_empty());
}
