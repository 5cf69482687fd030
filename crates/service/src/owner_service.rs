use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use models::owner;

use crate::errors::ServiceError;

/// Fields an owner may change on their own profile. `None` leaves a field as is.
#[derive(Clone, Debug, Default)]
pub struct UpdateOwner {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Get an owner by id.
pub async fn get_owner(db: &DatabaseConnection, id: i64) -> Result<Option<owner::Model>, ServiceError> {
    let found = owner::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Update an owner's profile. Changing the email keeps it unique.
pub async fn update_owner(
    db: &DatabaseConnection,
    id: i64,
    update: UpdateOwner,
) -> Result<owner::Model, ServiceError> {
    let current = get_owner(db, id).await?.ok_or_else(|| ServiceError::not_found("owner"))?;

    if let Some(email) = &update.email {
        owner::validate_email(email)?;
        if let Some(other) = owner::find_by_email(db, email).await? {
            if other.id != id {
                return Err(ServiceError::conflict("email"));
            }
        }
    }

    let mut am: owner::ActiveModel = current.into();
    if let Some(name) = update.name {
        if name.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        am.name = Set(name);
    }
    if let Some(email) = update.email {
        am.email = Set(email.to_lowercase());
    }
    if let Some(phone) = update.phone {
        am.phone = Set(Some(phone));
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete an owner; FK cascades take the owned records along.
pub async fn delete_owner(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    get_owner(db, id).await?.ok_or_else(|| ServiceError::not_found("owner"))?;
    owner::hard_delete(db, id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    fn email() -> String {
        format!("svc_owner_{}@example.com", Uuid::new_v4())
    }

    #[tokio::test]
    async fn owner_profile_update() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let created = owner::create(&db, "Before", &email(), None, "h").await?;
        let updated = update_owner(
            &db,
            created.id,
            UpdateOwner { name: Some("After".into()), phone: Some("+75550001122".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.name, "After");
        assert_eq!(updated.phone.as_deref(), Some("+75550001122"));
        assert!(updated.updated_at >= created.updated_at);

        delete_owner(&db, created.id).await?;
        assert!(get_owner(&db, created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn email_change_to_taken_address_conflicts() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let taken = email();
        let a = owner::create(&db, "A", &taken, None, "h").await?;
        let b = owner::create(&db, "B", &email(), None, "h").await?;

        let err = update_owner(&db, b.id, UpdateOwner { email: Some(taken), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        delete_owner(&db, a.id).await?;
        delete_owner(&db, b.id).await?;
        Ok(())
    }
}
