use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

use models::organization::{self, NewOrganization};

use crate::{errors::ServiceError, pagination::Pagination};

/// Fields an organization update may touch. `None` leaves a field as is.
#[derive(Clone, Debug, Default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
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

/// Create an organization for an owner. Registry numbers must not collide
/// with any existing organization.
pub async fn create_organization(
    db: &DatabaseConnection,
    owner_id: i64,
    input: NewOrganization,
) -> Result<organization::Model, ServiceError> {
    organization::validate_new(&input)?;
    if let Some(inn) = &input.inn {
        if organization::find_by_inn(db, inn).await?.is_some() {
            return Err(ServiceError::conflict("organization with this inn"));
        }
    }
    if let Some(ogrn) = &input.ogrn {
        if organization::find_by_ogrn(db, ogrn).await?.is_some() {
            return Err(ServiceError::conflict("organization with this ogrn"));
        }
    }
    let created = organization::create(db, owner_id, input).await?;
    Ok(created)
}

/// Get an organization by id.
pub async fn get_organization(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<organization::Model>, ServiceError> {
    let found = organization::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Public directory listing, paginated.
pub async fn list_organizations(
    db: &DatabaseConnection,
    opts: Pagination,
) -> Result<Vec<organization::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let rows = organization::Entity::find()
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// All organizations belonging to one owner.
pub async fn list_by_owner(
    db: &DatabaseConnection,
    owner_id: i64,
) -> Result<Vec<organization::Model>, ServiceError> {
    let rows = organization::Entity::find()
        .filter(organization::Column::OwnerId.eq(owner_id))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Fetch an organization and confirm the caller owns it.
pub async fn ensure_owned(
    db: &DatabaseConnection,
    id: i64,
    caller_id: i64,
) -> Result<organization::Model, ServiceError> {
    let org = get_organization(db, id).await?.ok_or_else(|| ServiceError::not_found("organization"))?;
    if org.owner_id != caller_id {
        return Err(ServiceError::forbidden("organization"));
    }
    Ok(org)
}

/// Update an owned organization. Registry number changes re-run the
/// uniqueness checks.
pub async fn update_organization(
    db: &DatabaseConnection,
    id: i64,
    caller_id: i64,
    update: UpdateOrganization,
) -> Result<organization::Model, ServiceError> {
    let current = ensure_owned(db, id, caller_id).await?;

    if let Some(inn) = &update.inn {
        organization::validate_inn(inn)?;
        if current.inn.as_deref() != Some(inn.as_str()) {
            if organization::find_by_inn(db, inn).await?.is_some() {
                return Err(ServiceError::conflict("organization with this inn"));
            }
        }
    }
    if let Some(ogrn) = &update.ogrn {
        organization::validate_ogrn(ogrn)?;
        if current.ogrn.as_deref() != Some(ogrn.as_str()) {
            if organization::find_by_ogrn(db, ogrn).await?.is_some() {
                return Err(ServiceError::conflict("organization with this ogrn"));
            }
        }
    }

    let mut am: organization::ActiveModel = current.into();
    if let Some(name) = update.name {
        if name.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        am.name = Set(name);
    }
    if let Some(v) = update.description { am.description = Set(Some(v)); }
    if let Some(v) = update.address { am.address = Set(Some(v)); }
    if let Some(v) = update.inn { am.inn = Set(Some(v)); }
    if let Some(v) = update.ogrn { am.ogrn = Set(Some(v)); }
    if let Some(v) = update.phone { am.phone = Set(Some(v)); }
    if let Some(v) = update.website { am.website = Set(Some(v)); }
    if let Some(v) = update.email { am.email = Set(Some(v)); }
    if let Some(v) = update.category { am.category = Set(Some(v)); }
    if let Some(v) = update.city { am.city = Set(Some(v)); }
    if let Some(v) = update.logo_url { am.logo_url = Set(Some(v)); }
    am.updated_at = Set(Utc::now().into());

    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete an owned organization; its services and products cascade away.
pub async fn delete_organization(
    db: &DatabaseConnection,
    id: i64,
    caller_id: i64,
) -> Result<(), ServiceError> {
    ensure_owned(db, id, caller_id).await?;
    organization::hard_delete(db, id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::owner;
    use uuid::Uuid;

    fn email() -> String {
        format!("svc_org_{}@example.com", Uuid::new_v4())
    }

    fn digits(len: usize) -> String {
        let mut s = Uuid::new_v4().as_u128().to_string().repeat(2);
        s.truncate(len);
        s
    }

    #[tokio::test]
    async fn organization_crud_with_ownership() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let me = owner::create(&db, "Me", &email(), None, "h").await?;
        let them = owner::create(&db, "Them", &email(), None, "h").await?;

        let org = create_organization(
            &db,
            me.id,
            NewOrganization { name: "Org One".into(), city: Some("Москва".into()), ..Default::default() },
        )
        .await?;

        // Another owner can neither update nor delete it
        let err = update_organization(
            &db,
            org.id,
            them.id,
            UpdateOrganization { name: Some("Taken Over".into()), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        let err = delete_organization(&db, org.id, them.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let updated = update_organization(
            &db,
            org.id,
            me.id,
            UpdateOrganization { description: Some("Окна и двери".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.description.as_deref(), Some("Окна и двери"));

        let mine = list_by_owner(&db, me.id).await?;
        assert!(mine.iter().any(|o| o.id == org.id));

        delete_organization(&db, org.id, me.id).await?;
        assert!(get_organization(&db, org.id).await?.is_none());

        owner::hard_delete(&db, me.id).await?;
        owner::hard_delete(&db, them.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_inn_is_conflict() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let me = owner::create(&db, "Inn Owner", &email(), None, "h").await?;
        let inn = digits(10);
        let _first = create_organization(
            &db,
            me.id,
            NewOrganization { name: "First".into(), inn: Some(inn.clone()), ..Default::default() },
        )
        .await?;

        let err = create_organization(
            &db,
            me.id,
            NewOrganization { name: "Second".into(), inn: Some(inn), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        owner::hard_delete(&db, me.id).await?;
        Ok(())
    }
}
