use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(string_len(Reports::Id, 64).primary_key())
                    .col(string_len(Reports::CoachId, 64))
                    .col(text(Reports::Description))
                    .col(date(Reports::GeneratedAt))
                    .col(json_binary(Reports::Entries))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reports::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reports { Table, Id, CoachId, Description, GeneratedAt, Entries }
