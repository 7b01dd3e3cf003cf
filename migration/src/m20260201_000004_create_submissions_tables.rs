use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Submissions (image, gif and video share one table keyed by kind)
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Submissions::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Submissions::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Submissions::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Submissions::ProjectTitle).string_len(100).not_null())
                    .col(ColumnDef::new(Submissions::Prompt).text().not_null())
                    .col(ColumnDef::new(Submissions::TechnicalNotes).text().null())
                    .col(ColumnDef::new(Submissions::ModelOrTool).string_len(255).null())
                    .col(ColumnDef::new(Submissions::CreatorCredit).string_len(255).not_null())
                    .col(ColumnDef::new(Submissions::MediaUrl).string_len(500).not_null())
                    .col(ColumnDef::new(Submissions::MediaFilename).string_len(255).null())
                    .col(ColumnDef::new(Submissions::SizeBytes).big_integer().null())
                    .col(ColumnDef::new(Submissions::Width).integer().null())
                    .col(ColumnDef::new(Submissions::Height).integer().null())
                    .col(ColumnDef::new(Submissions::DurationSeconds).double().null())
                    .col(ColumnDef::new(Submissions::FrameCount).integer().null())
                    .col(ColumnDef::new(Submissions::VideoFormat).string_len(32).null())
                    .col(ColumnDef::new(Submissions::Fps).double().null())
                    .col(ColumnDef::new(Submissions::Status).string_len(16).not_null().default("pending"))
                    .col(ColumnDef::new(Submissions::VerifiedBy).big_integer().null())
                    .col(ColumnDef::new(Submissions::VerifiedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Submissions::RejectionReason).text().null())
                    .col(ColumnDef::new(Submissions::LikesCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Submissions::ViewsCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Submissions::DownloadsCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Submissions::IsFeatured).boolean().not_null().default(false))
                    .col(ColumnDef::new(Submissions::IsPublished).boolean().not_null().default(false))
                    .col(ColumnDef::new(Submissions::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Submissions::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_user_id")
                            .from(Submissions::Table, Submissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_kind_created_at")
                    .table(Submissions::Table)
                    .col(Submissions::Kind)
                    .col(Submissions::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(Index::create().name("idx_submissions_status").table(Submissions::Table).col(Submissions::Status).to_owned())
            .await?;
        manager
            .create_index(Index::create().name("idx_submissions_user_id").table(Submissions::Table).col(Submissions::UserId).to_owned())
            .await?;

        // 2. Submission <-> Tag pivot
        manager
            .create_table(
                Table::create()
                    .table(SubmissionTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SubmissionTags::SubmissionId).big_integer().not_null())
                    .col(ColumnDef::new(SubmissionTags::TagId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(SubmissionTags::SubmissionId)
                            .col(SubmissionTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submission_tags_submission")
                            .from(SubmissionTags::Table, SubmissionTags::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submission_tags_tag")
                            .from(SubmissionTags::Table, SubmissionTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SubmissionTags::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Submissions::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum Submissions {
    Table,
    Id,
    Kind,
    UserId,
    ProjectTitle,
    Prompt,
    TechnicalNotes,
    ModelOrTool,
    CreatorCredit,
    MediaUrl,
    MediaFilename,
    SizeBytes,
    Width,
    Height,
    DurationSeconds,
    FrameCount,
    VideoFormat,
    Fps,
    Status,
    VerifiedBy,
    VerifiedAt,
    RejectionReason,
    LikesCount,
    ViewsCount,
    DownloadsCount,
    IsFeatured,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SubmissionTags {
    Table,
    SubmissionId,
    TagId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
}
