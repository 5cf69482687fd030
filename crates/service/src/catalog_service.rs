//! Services and products offered by organizations and entrepreneurs, plus
//! the category dropdowns.

use sea_orm::DatabaseConnection;

use models::service::NewListing;
use models::{product, product_category, service, service_category};

use crate::errors::ServiceError;
use crate::{entrepreneur_service, organization_service};

pub async fn list_service_categories(
    db: &DatabaseConnection,
) -> Result<Vec<service_category::Model>, ServiceError> {
    Ok(service_category::list(db).await?)
}

pub async fn list_product_categories(
    db: &DatabaseConnection,
) -> Result<Vec<product_category::Model>, ServiceError> {
    Ok(product_category::list(db).await?)
}

/// The caller must own whichever org/entrepreneur the listing is attached to.
async fn ensure_parent_owned(
    db: &DatabaseConnection,
    caller_id: i64,
    input: &NewListing,
) -> Result<(), ServiceError> {
    if let Some(org_id) = input.organization_id {
        organization_service::ensure_owned(db, org_id, caller_id).await?;
    }
    if let Some(ie_id) = input.entrepreneur_id {
        entrepreneur_service::ensure_owned(db, ie_id, caller_id).await?;
    }
    Ok(())
}

pub async fn create_service(
    db: &DatabaseConnection,
    caller_id: i64,
    input: NewListing,
) -> Result<service::Model, ServiceError> {
    service::validate_new(&input)?;
    ensure_parent_owned(db, caller_id, &input).await?;
    Ok(service::create(db, input).await?)
}

pub async fn create_product(
    db: &DatabaseConnection,
    caller_id: i64,
    input: NewListing,
) -> Result<product::Model, ServiceError> {
    service::validate_new(&input)?;
    ensure_parent_owned(db, caller_id, &input).await?;
    Ok(product::create(db, input).await?)
}

pub async fn services_of_organization(
    db: &DatabaseConnection,
    caller_id: i64,
    organization_id: i64,
) -> Result<Vec<service::Model>, ServiceError> {
    organization_service::ensure_owned(db, organization_id, caller_id).await?;
    Ok(service::list_by_organization(db, organization_id).await?)
}

pub async fn products_of_organization(
    db: &DatabaseConnection,
    caller_id: i64,
    organization_id: i64,
) -> Result<Vec<product::Model>, ServiceError> {
    organization_service::ensure_owned(db, organization_id, caller_id).await?;
    Ok(product::list_by_organization(db, organization_id).await?)
}

pub async fn services_of_entrepreneur(
    db: &DatabaseConnection,
    caller_id: i64,
    entrepreneur_id: i64,
) -> Result<Vec<service::Model>, ServiceError> {
    entrepreneur_service::ensure_owned(db, entrepreneur_id, caller_id).await?;
    Ok(service::list_by_entrepreneur(db, entrepreneur_id).await?)
}

pub async fn products_of_entrepreneur(
    db: &DatabaseConnection,
    caller_id: i64,
    entrepreneur_id: i64,
) -> Result<Vec<product::Model>, ServiceError> {
    entrepreneur_service::ensure_owned(db, entrepreneur_id, caller_id).await?;
    Ok(product::list_by_entrepreneur(db, entrepreneur_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::organization::NewOrganization;
    use models::owner;
    use uuid::Uuid;

    fn email() -> String {
        format!("svc_catalog_{}@example.com", Uuid::new_v4())
    }

    #[tokio::test]
    async fn listings_require_an_owned_parent() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let me = owner::create(&db, "Me", &email(), None, "h").await?;
        let them = owner::create(&db, "Them", &email(), None, "h").await?;
        let org = crate::organization_service::create_organization(
            &db,
            me.id,
            NewOrganization { name: "Listing Org".into(), ..Default::default() },
        )
        .await?;

        // A stranger cannot attach a service to my organization
        let err = create_service(
            &db,
            them.id,
            NewListing { name: "Poaching".into(), organization_id: Some(org.id), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let s = create_service(
            &db,
            me.id,
            NewListing {
                name: "Установка окон".into(),
                price: Some(2500.0),
                organization_id: Some(org.id),
                ..Default::default()
            },
        )
        .await?;

        // Owner-scoped listing: mine works, theirs is a 403
        let mine = services_of_organization(&db, me.id, org.id).await?;
        assert!(mine.iter().any(|m| m.id == s.id));
        let err = services_of_organization(&db, them.id, org.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        owner::hard_delete(&db, me.id).await?;
        owner::hard_delete(&db, them.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn missing_parent_is_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let me = owner::create(&db, "NoOrg", &email(), None, "h").await?;
        let err = create_product(
            &db,
            me.id,
            NewListing { name: "Orphan".into(), organization_id: Some(i64::MAX), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        owner::hard_delete(&db, me.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn category_dropdowns_come_back_sorted() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let tag = Uuid::new_v4();
        let remont = format!("Ремонт {tag}");
        let dostavka = format!("Доставка {tag}");
        service_category::create(&db, &remont, None).await?;
        service_category::create(&db, &dostavka, None).await?;

        let all = list_service_categories(&db).await?;
        let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
        let d = names.iter().position(|n| *n == dostavka).expect("created category listed");
        let r = names.iter().position(|n| *n == remont).expect("created category listed");
        // Ordered by name, so Д comes before Р regardless of insertion order
        assert!(d < r);
        Ok(())
    }
}
