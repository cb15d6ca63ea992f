use sea_orm_migration::prelude::*;

const INDEX_NAME: &str = "idx_show_hall_start_time";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Show::Table)
                    .col(Show::HallId)
                    .col(Show::StartTime)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX_NAME).table(Show::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Show {
    Table,
    HallId,
    StartTime,
}
