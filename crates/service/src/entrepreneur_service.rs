use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use models::entrepreneur;

use crate::{errors::ServiceError, pagination::Pagination};

#[derive(Clone, Debug, Default)]
pub struct UpdateEntrepreneur {
    pub inn: Option<String>,
    pub ogrnip: Option<String>,
    pub phone: Option<String>,
}

/// Create the entrepreneur record for an owner. An owner can have at most
/// one, and registry numbers are globally unique.
pub async fn create_entrepreneur(
    db: &DatabaseConnection,
    owner_id: i64,
    inn: &str,
    ogrnip: &str,
    phone: Option<&str>,
) -> Result<entrepreneur::Model, ServiceError> {
    entrepreneur::validate_inn(inn)?;
    entrepreneur::validate_ogrnip(ogrnip)?;
    if entrepreneur::find_by_owner(db, owner_id).await?.is_some() {
        return Err(ServiceError::conflict("entrepreneur record for this owner"));
    }
    if entrepreneur::find_by_inn(db, inn).await?.is_some() {
        return Err(ServiceError::conflict("entrepreneur with this inn"));
    }
    if entrepreneur::find_by_ogrnip(db, ogrnip).await?.is_some() {
        return Err(ServiceError::conflict("entrepreneur with this ogrnip"));
    }
    let created = entrepreneur::create(db, owner_id, inn, ogrnip, phone).await?;
    Ok(created)
}

pub async fn get_entrepreneur(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<entrepreneur::Model>, ServiceError> {
    let found = entrepreneur::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

pub async fn list_entrepreneurs(
    db: &DatabaseConnection,
    opts: Pagination,
) -> Result<Vec<entrepreneur::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let rows = entrepreneur::Entity::find()
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Fetch an entrepreneur record and confirm the caller owns it.
pub async fn ensure_owned(
    db: &DatabaseConnection,
    id: i64,
    caller_id: i64,
) -> Result<entrepreneur::Model, ServiceError> {
    let e = get_entrepreneur(db, id).await?.ok_or_else(|| ServiceError::not_found("entrepreneur"))?;
    if e.owner_id != caller_id {
        return Err(ServiceError::forbidden("entrepreneur record"));
    }
    Ok(e)
}

pub async fn update_entrepreneur(
    db: &DatabaseConnection,
    id: i64,
    caller_id: i64,
    update: UpdateEntrepreneur,
) -> Result<entrepreneur::Model, ServiceError> {
    let current = ensure_owned(db, id, caller_id).await?;

    if let Some(inn) = &update.inn {
        entrepreneur::validate_inn(inn)?;
        if current.inn != *inn && entrepreneur::find_by_inn(db, inn).await?.is_some() {
            return Err(ServiceError::conflict("entrepreneur with this inn"));
        }
    }
    if let Some(ogrnip) = &update.ogrnip {
        entrepreneur::validate_ogrnip(ogrnip)?;
        if current.ogrnip != *ogrnip && entrepreneur::find_by_ogrnip(db, ogrnip).await?.is_some() {
            return Err(ServiceError::conflict("entrepreneur with this ogrnip"));
        }
    }

    let mut am: entrepreneur::ActiveModel = current.into();
    if let Some(v) = update.inn { am.inn = Set(v); }
    if let Some(v) = update.ogrnip { am.ogrnip = Set(v); }
    if let Some(v) = update.phone { am.phone = Set(Some(v)); }
    am.updated_at = Set(Utc::now().into());

    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

pub async fn delete_entrepreneur(
    db: &DatabaseConnection,
    id: i64,
    caller_id: i64,
) -> Result<(), ServiceError> {
    ensure_owned(db, id, caller_id).await?;
    entrepreneur::hard_delete(db, id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::owner;
    use uuid::Uuid;

    fn email() -> String {
        format!("svc_ie_{}@example.com", Uuid::new_v4())
    }

    fn digits(len: usize) -> String {
        let mut s = Uuid::new_v4().as_u128().to_string().repeat(2);
        s.truncate(len);
        s
    }

    #[tokio::test]
    async fn second_record_for_same_owner_conflicts() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let me = owner::create(&db, "IE", &email(), None, "h").await?;
        create_entrepreneur(&db, me.id, &digits(12), &digits(15), None).await?;

        let err = create_entrepreneur(&db, me.id, &digits(12), &digits(15), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        owner::hard_delete(&db, me.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_respects_ownership() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let me = owner::create(&db, "Mine", &email(), None, "h").await?;
        let them = owner::create(&db, "Theirs", &email(), None, "h").await?;
        let rec = create_entrepreneur(&db, me.id, &digits(12), &digits(15), None).await?;

        let err = update_entrepreneur(
            &db,
            rec.id,
            them.id,
            UpdateEntrepreneur { phone: Some("+70000000000".into()), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let updated = update_entrepreneur(
            &db,
            rec.id,
            me.id,
            UpdateEntrepreneur { phone: Some("+70000000000".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.phone.as_deref(), Some("+70000000000"));

        owner::hard_delete(&db, me.id).await?;
        owner::hard_delete(&db, them.id).await?;
        Ok(())
    }
}
