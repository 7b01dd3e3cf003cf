use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Otps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Otps::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Otps::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Otps::Code).string_len(6).not_null())
                    .col(ColumnDef::new(Otps::Purpose).string_len(32).not_null())
                    .col(ColumnDef::new(Otps::ExpiresAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Otps::Verified).boolean().not_null().default(false))
                    .col(ColumnDef::new(Otps::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Every ledger lookup is keyed by email first.
        manager
            .create_index(
                Index::create()
                    .name("idx_otps_email_purpose")
                    .table(Otps::Table)
                    .col(Otps::Email)
                    .col(Otps::Purpose)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Otps::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum Otps {
    Table,
    Id,
    Email,
    Code,
    Purpose,
    ExpiresAt,
    Verified,
    CreatedAt,
}
