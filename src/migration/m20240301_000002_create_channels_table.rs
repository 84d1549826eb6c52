use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_sources_table::Sources;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Source deletion clears references in the application, no cascade here
        manager
            .create_table(
                Table::create()
                    .table(Channels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Channels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Channels::StreamPath)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Channels::Pos)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Channels::SourceId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channels_source_id")
                            .from(Channels::Table, Channels::SourceId)
                            .to(Sources::Table, Sources::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_channels_stream_path")
                    .table(Channels::Table)
                    .col(Channels::StreamPath)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Channels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Channels {
    Table,
    Id,
    StreamPath,
    Pos,
    SourceId,
}
