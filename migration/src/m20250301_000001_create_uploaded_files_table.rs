use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UploadedFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UploadedFiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UploadedFiles::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(UploadedFiles::StorageKey).string().not_null())
                    // Uniqueness enforced here; concurrent identical uploads hit a
                    // constraint violation.
                    .col(
                        ColumnDef::new(UploadedFiles::FileHash)
                            .string_len(64)
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UploadedFiles::UploadedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UploadedFiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UploadedFiles {
    Table,
    Id,
    Name,
    StorageKey,
    FileHash,
    UploadedAt,
}
