//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_owner;
mod m20250101_000002_create_organization;
mod m20250101_000003_create_entrepreneur;
mod m20250101_000004_create_service_category;
mod m20250101_000005_create_product_category;
mod m20250101_000006_create_service;
mod m20250101_000007_create_product;
mod m20250101_000008_create_meme;
mod m20250101_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_owner::Migration),
            Box::new(m20250101_000002_create_organization::Migration),
            Box::new(m20250101_000003_create_entrepreneur::Migration),
            Box::new(m20250101_000004_create_service_category::Migration),
            Box::new(m20250101_000005_create_product_category::Migration),
            Box::new(m20250101_000006_create_service::Migration),
            Box::new(m20250101_000007_create_product::Migration),
            Box::new(m20250101_000008_create_meme::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000009_add_indexes::Migration),
        ]
    }
}
