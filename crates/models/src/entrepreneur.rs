use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::owner;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entrepreneur")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub inn: String,
    pub ogrnip: String,
    pub phone: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Owner => Entity::belongs_to(owner::Entity).from(Column::OwnerId).to(owner::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Individual INN is 12 digits.
pub fn validate_inn(inn: &str) -> Result<(), errors::ModelError> {
    if inn.len() != 12 || !inn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("inn must be 12 digits".into()));
    }
    Ok(())
}

/// OGRNIP is 15 digits.
pub fn validate_ogrnip(ogrnip: &str) -> Result<(), errors::ModelError> {
    if ogrnip.len() != 15 || !ogrnip.bytes().all(|b| b.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("ogrnip must be 15 digits".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    owner_id: i64,
    inn: &str,
    ogrnip: &str,
    phone: Option<&str>,
) -> Result<Model, errors::ModelError> {
    validate_inn(inn)?;
    validate_ogrnip(ogrnip)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        inn: Set(inn.to_string()),
        ogrnip: Set(ogrnip.to_string()),
        phone: Set(phone.map(|p| p.to_string())),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_owner(
    db: &DatabaseConnection,
    owner_id: i64,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find().filter(Column::OwnerId.eq(owner_id)).one(db).await?;
    Ok(found)
}

pub async fn find_by_inn(
    db: &DatabaseConnection,
    inn: &str,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find().filter(Column::Inn.eq(inn)).one(db).await?;
    Ok(found)
}

pub async fn find_by_ogrnip(
    db: &DatabaseConnection,
    ogrnip: &str,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find().filter(Column::Ogrnip.eq(ogrnip)).one(db).await?;
    Ok(found)
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
