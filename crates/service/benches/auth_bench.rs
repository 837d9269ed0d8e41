use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use models::user::Role;
use service::auth::domain::LoginInput;
use service::auth::service::{AuthConfig, AuthService};
use service::gym_session::{domain::NewGymSession, repository::memory::InMemoryGymSessionRepository, GymSessionService};
use service::user::{domain::NewUser, repository::memory::InMemoryUserRepository, UserService};

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(InMemoryUserRepository::default());
    let users = UserService::new(repo.clone());
    let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 1 });

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(users.create(NewUser {
        id: Some("bench".into()),
        name: Some("Bench".into()),
        email: Some("bench@example.com".into()),
        password: Some("Benchmark1".into()),
        role: Some(Role::Student),
        ..Default::default()
    }))
    .unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
        });
    });
}

fn bench_session_time_lookup(c: &mut Criterion) {
    let user_repo = Arc::new(InMemoryUserRepository::default());
    let users = UserService::new(user_repo.clone());
    let sessions = GymSessionService::new(Arc::new(InMemoryGymSessionRepository::default()), user_repo);
    let rt = tokio::runtime::Runtime::new().unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();

    rt.block_on(async {
        users
            .create(NewUser {
                id: Some("coach".into()),
                name: Some("Coach".into()),
                email: Some("coach@example.com".into()),
                role: Some(Role::Trainer),
                ..Default::default()
            })
            .await
            .unwrap();
        for i in 0..500u32 {
            let hour = 6 + i % 14;
            sessions
                .create(NewGymSession {
                    id: Some(format!("s{i:04}")),
                    coach_id: Some("coach".into()),
                    date: Some(day),
                    start_time: NaiveTime::from_hms_opt(hour, 0, 0),
                    end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0),
                    capacity: Some(20),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
    });

    let from = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let to = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    c.bench_function("sessions_by_date_and_start_range", |b| {
        b.iter(|| rt.block_on(sessions.list_by_date_and_start_between(day, from, to)).unwrap());
    });
}

criterion_group!(benches, bench_login, bench_session_time_lookup);
criterion_main!(benches);
