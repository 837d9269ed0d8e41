use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct NewUserDoc {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    /// STUDENT, TRAINER or ADMIN
    pub role: String,
    /// YYYY-MM-DD, defaults to today
    pub registration_date: Option<String>,
}

/// Absent fields keep their value; `null` is rejected.
#[derive(ToSchema)]
pub struct UserPatchDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct NewGymSessionDoc {
    pub id: Option<String>,
    pub coach_id: String,
    #[schema(example = "2024-05-02")]
    pub date: String,
    #[schema(example = "09:00:00")]
    pub start_time: String,
    #[schema(example = "10:00:00")]
    pub end_time: String,
    pub capacity: i32,
    pub current_reservations: Option<i32>,
    pub attendance: Option<Vec<bool>>,
}

#[derive(ToSchema)]
pub struct GymSessionPatchDoc {
    pub coach_id: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<i32>,
    pub current_reservations: Option<i32>,
}

#[derive(ToSchema)]
pub struct NewReservationDoc {
    pub id: Option<String>,
    pub user_id: String,
    pub session_id: String,
    /// Defaults to now
    #[schema(example = "2024-05-01T08:00:00")]
    pub reservation_date: Option<String>,
    /// PENDING, CONFIRMED (default) or CANCELLED
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct ReservationPatchDoc {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub reservation_date: Option<String>,
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct ExerciseDoc { pub name: String, pub repetitions: i32, pub sets: i32, pub duration: i32 }

#[derive(ToSchema)]
pub struct RoutineDoc {
    pub name: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub exercises: Vec<ExerciseDoc>,
}

#[derive(ToSchema)]
pub struct MeasurementsDoc {
    pub weight: f64,
    pub height: f64,
    pub waist: f64,
    pub chest: f64,
    pub right_arm: f64,
    pub left_arm: f64,
    pub right_leg: f64,
    pub left_leg: f64,
}

/// Only the measurements present in the body change.
#[derive(ToSchema)]
pub struct MeasurementsPatchDoc {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub waist: Option<f64>,
    pub chest: Option<f64>,
    pub right_arm: Option<f64>,
    pub left_arm: Option<f64>,
    pub right_leg: Option<f64>,
    pub left_leg: Option<f64>,
}

#[derive(ToSchema)]
pub struct NewPhysicalProgressDoc {
    pub id: Option<String>,
    pub user_id: String,
    pub routine: Option<RoutineDoc>,
    pub measurements: Option<MeasurementsDoc>,
    pub goal: Option<String>,
    pub registration_date: Option<String>,
}

/// `routine` and `goal` accept `null` to clear them.
#[derive(ToSchema)]
pub struct PhysicalProgressPatchDoc {
    pub routine: Option<RoutineDoc>,
    pub measurements: Option<MeasurementsPatchDoc>,
    pub goal: Option<String>,
    pub registration_date: Option<String>,
}

#[derive(ToSchema)]
pub struct ReportEntryDoc {
    pub session: String,
    #[schema(value_type = Object)]
    pub metrics: serde_json::Value,
}

#[derive(ToSchema)]
pub struct NewReportDoc {
    pub id: Option<String>,
    pub coach_id: String,
    pub description: Option<String>,
    #[schema(example = "2024-06-10")]
    pub generated_at: String,
    pub entries: Option<Vec<ReportEntryDoc>>,
}

#[derive(ToSchema)]
pub struct ReportPatchDoc {
    pub coach_id: Option<String>,
    pub description: Option<String>,
    pub generated_at: Option<String>,
    pub entries: Option<Vec<ReportEntryDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::get,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::users::by_name,
        crate::routes::users::by_email,
        crate::routes::users::by_role,
        crate::routes::users::by_registration_date,
        crate::routes::sessions::list,
        crate::routes::sessions::get,
        crate::routes::sessions::by_coach,
        crate::routes::sessions::by_capacity,
        crate::routes::sessions::by_date,
        crate::routes::sessions::by_date_and_time,
        crate::routes::sessions::by_time,
        crate::routes::sessions::by_end_time,
        crate::routes::sessions::create,
        crate::routes::sessions::update,
        crate::routes::sessions::update_attendance,
        crate::routes::sessions::delete,
        crate::routes::reservations::list,
        crate::routes::reservations::by_session,
        crate::routes::reservations::by_date,
        crate::routes::reservations::by_status,
        crate::routes::reservations::create,
        crate::routes::reservations::get,
        crate::routes::reservations::update,
        crate::routes::reservations::delete,
        crate::routes::reservations::by_user,
        crate::routes::progress::list,
        crate::routes::progress::create,
        crate::routes::progress::get,
        crate::routes::progress::update,
        crate::routes::progress::delete,
        crate::routes::progress::by_user,
        crate::routes::progress::by_date,
        crate::routes::progress::by_user_and_date,
        crate::routes::progress::by_user_and_range,
        crate::routes::reports::list,
        crate::routes::reports::create,
        crate::routes::reports::get,
        crate::routes::reports::update,
        crate::routes::reports::delete,
        crate::routes::reports::by_date,
        crate::routes::reports::by_coach,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            NewUserDoc,
            UserPatchDoc,
            NewGymSessionDoc,
            GymSessionPatchDoc,
            NewReservationDoc,
            ReservationPatchDoc,
            ExerciseDoc,
            RoutineDoc,
            MeasurementsDoc,
            MeasurementsPatchDoc,
            NewPhysicalProgressDoc,
            PhysicalProgressPatchDoc,
            ReportEntryDoc,
            NewReportDoc,
            ReportPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "users"),
        (name = "sessions"),
        (name = "reservations"),
        (name = "progress"),
        (name = "reports")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_group_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/auth/login",
            "/api/admin/users/{id}",
            "/api/user/sessions/date/{date}/time",
            "/api/trainer/sessions/{id}/attendance",
            "/api/user/progress/user/{user_id}/range",
            "/api/trainer/reports/coach/{coach_id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
