use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users: email is unique across all users
        manager
            .create_index(
                Index::create()
                    .name("uniq_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gym_sessions_coach")
                    .table(GymSessions::Table)
                    .col(GymSessions::CoachId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_gym_sessions_date")
                    .table(GymSessions::Table)
                    .col(GymSessions::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_session")
                    .table(Reservations::Table)
                    .col(Reservations::SessionId)
                    .to_owned(),
            )
            .await?;

        // PhysicalProgress: composite (user_id, registration_date) serves user and user+date lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_progress_user_date")
                    .table(PhysicalProgress::Table)
                    .col(PhysicalProgress::UserId)
                    .col(PhysicalProgress::RegistrationDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_coach")
                    .table(Reports::Table)
                    .col(Reports::CoachId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_users_email").table(Users::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_gym_sessions_coach").table(GymSessions::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_gym_sessions_date").table(GymSessions::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservations_user").table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservations_session").table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_progress_user_date").table(PhysicalProgress::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reports_coach").table(Reports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Email }

#[derive(DeriveIden)]
enum GymSessions { Table, CoachId, Date }

#[derive(DeriveIden)]
enum Reservations { Table, UserId, SessionId }

#[derive(DeriveIden)]
enum PhysicalProgress { Table, UserId, RegistrationDate }

#[derive(DeriveIden)]
enum Reports { Table, CoachId }
