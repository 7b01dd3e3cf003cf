use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tags::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Tags::Name).string_len(100).not_null().unique_key())
                    .col(ColumnDef::new(Tags::Category).string_len(16).not_null().default("Other"))
                    .col(ColumnDef::new(Tags::Description).text().null())
                    .col(ColumnDef::new(Tags::UsageCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Tags::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Tags::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Tags::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(Index::create().name("idx_tags_category").table(Tags::Table).col(Tags::Category).to_owned())
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tags::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    Name,
    Category,
    Description,
    UsageCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
