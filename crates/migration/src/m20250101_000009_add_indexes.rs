use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Organization: registry numbers are unique when present
        manager
            .create_index(
                Index::create()
                    .name("uniq_organization_inn")
                    .table(Organization::Table)
                    .col(Organization::Inn)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq_organization_ogrn")
                    .table(Organization::Table)
                    .col(Organization::Ogrn)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_organization_owner")
                    .table(Organization::Table)
                    .col(Organization::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Service/Product: owner-scoped listings filter on these
        manager
            .create_index(
                Index::create()
                    .name("idx_service_organization")
                    .table(Service::Table)
                    .col(Service::OrganizationId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_entrepreneur")
                    .table(Service::Table)
                    .col(Service::EntrepreneurId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_product_organization")
                    .table(Product::Table)
                    .col(Product::OrganizationId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_product_entrepreneur")
                    .table(Product::Table)
                    .col(Product::EntrepreneurId)
                    .to_owned(),
            )
            .await?;

        // Meme: list endpoint orders by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_meme_created_at")
                    .table(Meme::Table)
                    .col(Meme::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_organization_inn").table(Organization::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_organization_ogrn").table(Organization::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_organization_owner").table(Organization::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_organization").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_entrepreneur").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_organization").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_entrepreneur").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_meme_created_at").table(Meme::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Organization { Table, Inn, Ogrn, OwnerId }

#[derive(DeriveIden)]
enum Service { Table, OrganizationId, EntrepreneurId }

#[derive(DeriveIden)]
enum Product { Table, OrganizationId, EntrepreneurId }

#[derive(DeriveIden)]
enum Meme { Table, CreatedAt }
