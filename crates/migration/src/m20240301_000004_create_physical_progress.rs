//! Create `physical_progress` table.
//!
//! Routine and body measurements are embedded documents stored as JSONB.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhysicalProgress::Table)
                    .if_not_exists()
                    .col(string_len(PhysicalProgress::Id, 64).primary_key())
                    .col(string_len(PhysicalProgress::UserId, 64))
                    .col(json_binary_null(PhysicalProgress::Routine))
                    .col(json_binary(PhysicalProgress::Measurements))
                    .col(text_null(PhysicalProgress::Goal))
                    .col(date(PhysicalProgress::RegistrationDate))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PhysicalProgress::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PhysicalProgress { Table, Id, UserId, Routine, Measurements, Goal, RegistrationDate }
