//! Create `meme` table; `image_key` points into the object store.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Meme::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Meme::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Meme::Title, 255).not_null())
                    .col(text(Meme::Description).not_null())
                    .col(string_len(Meme::ImageKey, 512).not_null())
                    .col(timestamp_with_time_zone(Meme::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Meme::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Meme { Table, Id, Title, Description, ImageKey, CreatedAt }
