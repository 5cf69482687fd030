//! Create `owner` table.
//!
//! Stores registered principals; every business record hangs off one of these.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owner::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Owner::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Owner::Name, 128).not_null())
                    .col(string_len(Owner::Email, 255).unique_key().not_null())
                    .col(string_len_null(Owner::Phone, 32))
                    .col(string_len(Owner::PasswordHash, 255).not_null())
                    .col(timestamp_with_time_zone(Owner::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Owner::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Owner::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Owner { Table, Id, Name, Email, Phone, PasswordHash, CreatedAt, UpdatedAt }
