use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::owner;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organization")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub inn: Option<String>,
    pub ogrn: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub logo_url: Option<String>,
    pub is_verified: bool,
    pub rating: Option<f64>,
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

/// Insert payload; optional registry numbers are validated when present.
#[derive(Clone, Debug, Default)]
pub struct NewOrganization {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub inn: Option<String>,
    pub ogrn: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub logo_url: Option<String>,
}

/// Legal-entity INN is 10 digits.
pub fn validate_inn(inn: &str) -> Result<(), errors::ModelError> {
    if inn.len() != 10 || !inn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("inn must be 10 digits".into()));
    }
    Ok(())
}

/// OGRN is 13 digits.
pub fn validate_ogrn(ogrn: &str) -> Result<(), errors::ModelError> {
    if ogrn.len() != 13 || !ogrn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("ogrn must be 13 digits".into()));
    }
    Ok(())
}

pub fn validate_new(input: &NewOrganization) -> Result<(), errors::ModelError> {
    if input.name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if let Some(inn) = &input.inn {
        validate_inn(inn)?;
    }
    if let Some(ogrn) = &input.ogrn {
        validate_ogrn(ogrn)?;
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    owner_id: i64,
    input: NewOrganization,
) -> Result<Model, errors::ModelError> {
    validate_new(&input)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        address: Set(input.address),
        inn: Set(input.inn),
        ogrn: Set(input.ogrn),
        phone: Set(input.phone),
        website: Set(input.website),
        email: Set(input.email),
        category: Set(input.category),
        city: Set(input.city),
        logo_url: Set(input.logo_url),
        is_verified: Set(false),
        rating: Set(None),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_inn(
    db: &DatabaseConnection,
    inn: &str,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find().filter(Column::Inn.eq(inn)).one(db).await?;
    Ok(found)
}

pub async fn find_by_ogrn(
    db: &DatabaseConnection,
    ogrn: &str,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find().filter(Column::Ogrn.eq(ogrn)).one(db).await?;
    Ok(found)
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
