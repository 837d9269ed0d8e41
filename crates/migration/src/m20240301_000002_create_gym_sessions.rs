//! Create `gym_sessions` table. `coach_id` references a user by id without a FK, no cascade.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GymSessions::Table)
                    .if_not_exists()
                    .col(string_len(GymSessions::Id, 64).primary_key())
                    .col(string_len(GymSessions::CoachId, 64))
                    .col(date(GymSessions::Date))
                    .col(time(GymSessions::StartTime))
                    .col(time(GymSessions::EndTime))
                    .col(integer(GymSessions::Capacity))
                    .col(integer(GymSessions::CurrentReservations).default(0))
                    .col(json_binary(GymSessions::Attendance))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(GymSessions::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum GymSessions { Table, Id, CoachId, Date, StartTime, EndTime, Capacity, CurrentReservations, Attendance }
