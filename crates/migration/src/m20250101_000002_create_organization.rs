//! Create `organization` table with FK to `owner`.
//!
//! Registry numbers (inn/ogrn) are nullable; their unique indexes are added
//! in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organization::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organization::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Organization::Name, 255).not_null())
                    .col(text_null(Organization::Description))
                    .col(string_len_null(Organization::Address, 512))
                    .col(string_len_null(Organization::Inn, 12))
                    .col(string_len_null(Organization::Ogrn, 15))
                    .col(string_len_null(Organization::Phone, 32))
                    .col(string_len_null(Organization::Website, 255))
                    .col(string_len_null(Organization::Email, 255))
                    .col(string_len_null(Organization::Category, 128))
                    .col(string_len_null(Organization::City, 128))
                    .col(string_len_null(Organization::LogoUrl, 512))
                    .col(boolean(Organization::IsVerified).default(false).not_null())
                    .col(double_null(Organization::Rating))
                    .col(big_integer(Organization::OwnerId).not_null())
                    .col(timestamp_with_time_zone(Organization::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Organization::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_owner")
                            .from(Organization::Table, Organization::OwnerId)
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
            .drop_table(Table::drop().table(Organization::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Organization {
    Table,
    Id,
    Name,
    Description,
    Address,
    Inn,
    Ogrn,
    Phone,
    Website,
    Email,
    Category,
    City,
    LogoUrl,
    IsVerified,
    Rating,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Owner { Table, Id }
