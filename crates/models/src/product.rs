use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::service::NewListing;
use crate::{entrepreneur, organization, product_category};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    pub organization_id: Option<i64>,
    pub entrepreneur_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    Organization,
    Entrepreneur,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(product_category::Entity).from(Column::CategoryId).to(product_category::Column::Id).into(),
            Relation::Organization => Entity::belongs_to(organization::Entity).from(Column::OrganizationId).to(organization::Column::Id).into(),
            Relation::Entrepreneur => Entity::belongs_to(entrepreneur::Entity).from(Column::EntrepreneurId).to(entrepreneur::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    input: NewListing,
) -> Result<Model, errors::ModelError> {
    crate::service::validate_new(&input)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        price: Set(input.price),
        category_id: Set(input.category_id),
        organization_id: Set(input.organization_id),
        entrepreneur_id: Set(input.entrepreneur_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list_by_organization(
    db: &DatabaseConnection,
    organization_id: i64,
) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::OrganizationId.eq(organization_id))
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn list_by_entrepreneur(
    db: &DatabaseConnection,
    entrepreneur_id: i64,
) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::EntrepreneurId.eq(entrepreneur_id))
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
