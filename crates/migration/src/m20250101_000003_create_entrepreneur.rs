//! Create `entrepreneur` table with FK to `owner`.
//! The unique `owner_id` keeps it one entrepreneur record per owner.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entrepreneur::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entrepreneur::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Entrepreneur::Inn, 12).unique_key().not_null())
                    .col(string_len(Entrepreneur::Ogrnip, 15).unique_key().not_null())
                    .col(string_len_null(Entrepreneur::Phone, 32))
                    .col(big_integer(Entrepreneur::OwnerId).unique_key().not_null())
                    .col(timestamp_with_time_zone(Entrepreneur::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Entrepreneur::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entrepreneur_owner")
                            .from(Entrepreneur::Table, Entrepreneur::OwnerId)
                            .to(Owner::Table, Owner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entrepreneur::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Entrepreneur { Table, Id, Inn, Ogrnip, Phone, OwnerId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Owner { Table, Id }
