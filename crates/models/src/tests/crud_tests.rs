use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

use super::skip_db_tests;
use crate::db::connect;
use crate::{gym_session, physical_progress, report, reservation, user};

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn sample_user(role: user::Role) -> user::Model {
    let id = Uuid::new_v4().to_string();
    user::Model {
        email: format!("crud_{id}@example.com"),
        id,
        name: "Crud User".into(),
        password_hash: None,
        role,
        registration_date: Utc::now().date_naive(),
    }
}

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let created = sample_user(user::Role::Student).into_active_model().insert(&db).await?;
    let found = user::Entity::find()
        .filter(user::Column::Email.eq(created.email.clone()))
        .one(&db)
        .await?;
    assert_eq!(found.as_ref().map(|u| u.id.clone()), Some(created.id.clone()));

    let mut am: user::ActiveModel = created.clone().into();
    am.name = Set("Renamed".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.role, user::Role::Student);

    // Unique index on email
    let mut dup = sample_user(user::Role::Student);
    dup.email = created.email.clone();
    assert!(dup.into_active_model().insert(&db).await.is_err());

    user::Entity::delete_by_id(created.id.clone()).exec(&db).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_session_reservation_progress_report_crud() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let coach = sample_user(user::Role::Trainer).into_active_model().insert(&db).await?;
    let student = sample_user(user::Role::Student).into_active_model().insert(&db).await?;

    let session = gym_session::Model {
        id: Uuid::new_v4().to_string(),
        coach_id: coach.id.clone(),
        date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        capacity: 12,
        current_reservations: 0,
        attendance: gym_session::Attendance(vec![true, false]),
    }
    .into_active_model()
    .insert(&db)
    .await?;
    let loaded = gym_session::Entity::find_by_id(session.id.clone()).one(&db).await?.unwrap();
    assert_eq!(loaded.attendance, session.attendance);

    let res = reservation::Model {
        id: Uuid::new_v4().to_string(),
        user_id: student.id.clone(),
        session_id: session.id.clone(),
        reservation_date: Utc::now().naive_utc(),
        status: reservation::ReservationStatus::Confirmed,
    }
    .into_active_model()
    .insert(&db)
    .await?;
    let by_status = reservation::Entity::find()
        .filter(reservation::Column::Status.eq(reservation::ReservationStatus::Confirmed))
        .filter(reservation::Column::Id.eq(res.id.clone()))
        .all(&db)
        .await?;
    assert_eq!(by_status.len(), 1);

    let progress = physical_progress::Model {
        id: Uuid::new_v4().to_string(),
        user_id: student.id.clone(),
        routine: Some(physical_progress::Routine {
            id: None,
            name: "Legs".into(),
            description: "squats".into(),
            difficulty: "hard".into(),
            exercises: vec![physical_progress::Exercise { name: "Squat".into(), repetitions: 8, sets: 4, duration: 20 }],
        }),
        measurements: physical_progress::Measurements { weight: 72.0, height: 178.0, ..Default::default() },
        goal: Some("gain".into()),
        registration_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
    }
    .into_active_model()
    .insert(&db)
    .await?;
    let loaded = physical_progress::Entity::find_by_id(progress.id.clone()).one(&db).await?.unwrap();
    assert_eq!(loaded.routine, progress.routine);

    let mut metrics = BTreeMap::new();
    metrics.insert("attendance".to_string(), serde_json::json!(5));
    let rep = report::Model {
        id: Uuid::new_v4().to_string(),
        coach_id: coach.id.clone(),
        description: "weekly".into(),
        generated_at: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
        entries: report::ReportEntries(vec![report::ReportEntry { session: "Session 1".into(), metrics }]),
    }
    .into_active_model()
    .insert(&db)
    .await?;
    let loaded = report::Entity::find_by_id(rep.id.clone()).one(&db).await?.unwrap();
    assert_eq!(loaded.entries, rep.entries);

    report::Entity::delete_by_id(rep.id).exec(&db).await?;
    physical_progress::Entity::delete_by_id(progress.id).exec(&db).await?;
    reservation::Entity::delete_by_id(res.id).exec(&db).await?;
    gym_session::Entity::delete_by_id(session.id).exec(&db).await?;
    user::Entity::delete_by_id(coach.id).exec(&db).await?;
    user::Entity::delete_by_id(student.id).exec(&db).await?;
    Ok(())
}
