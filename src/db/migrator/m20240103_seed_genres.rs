use crate::constants::seed::GENRES;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Genre::Table)
            .columns([Genre::Name])
            .on_conflict(OnConflict::column(Genre::Name).do_nothing().to_owned());

        for name in GENRES {
            insert
                .values([(*name).into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Genre::Table)
            .and_where(Expr::col(Genre::Name).is_in(GENRES.iter().copied()))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Name,
}
