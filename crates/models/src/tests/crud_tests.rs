use crate::db::connect;
use crate::{entrepreneur, meme, organization, owner, product, service};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    // 并行测试可能同时跑迁移，表或迁移记录已存在时忽略
    if let Err(e) = migration::Migrator::up(&db, None).await {
        let msg = format!("{}", e);
        if !msg.contains("duplicate key value violates unique constraint")
            && !msg.contains("already exists")
        {
            return Err(e.into());
        }
    }
    Ok(db)
}

fn unique_email() -> String {
    format!("owner_{}@example.com", Uuid::new_v4())
}

fn digits(len: usize) -> String {
    let raw: String = Uuid::new_v4().as_u128().to_string();
    let mut s = raw.repeat(2);
    s.truncate(len);
    s
}

#[tokio::test]
async fn test_owner_crud_and_cascade() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = unique_email();
    let o = owner::create(&db, "Bob", &email, Some("+79990000000"), "argon2-hash").await?;
    assert!(o.id > 0);
    assert_eq!(o.email, email);

    let found = owner::find_by_email(&db, &email).await?;
    assert_eq!(found.map(|m| m.id), Some(o.id));

    // Owned records must disappear with the owner
    let org = organization::create(
        &db,
        o.id,
        organization::NewOrganization { name: "Cascade Org".into(), ..Default::default() },
    )
    .await?;

    owner::hard_delete(&db, o.id).await?;
    assert!(owner::find_by_email(&db, &email).await?.is_none());
    assert!(organization::Entity::find_by_id(org.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_organization_unique_registry_numbers() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let o = owner::create(&db, "Org Owner", &unique_email(), None, "h").await?;
    let inn = digits(10);
    let ogrn = digits(13);

    let org = organization::create(
        &db,
        o.id,
        organization::NewOrganization {
            name: "Unique Org".into(),
            inn: Some(inn.clone()),
            ogrn: Some(ogrn.clone()),
            ..Default::default()
        },
    )
    .await?;

    let by_inn = organization::find_by_inn(&db, &inn).await?;
    assert_eq!(by_inn.map(|m| m.id), Some(org.id));

    // Second row with the same inn must be rejected by the unique index
    let dup = organization::create(
        &db,
        o.id,
        organization::NewOrganization {
            name: "Dup Org".into(),
            inn: Some(inn),
            ..Default::default()
        },
    )
    .await;
    assert!(dup.is_err());

    owner::hard_delete(&db, o.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_entrepreneur_one_per_owner() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let o = owner::create(&db, "IE Owner", &unique_email(), None, "h").await?;
    let e = entrepreneur::create(&db, o.id, &digits(12), &digits(15), None).await?;
    assert_eq!(entrepreneur::find_by_owner(&db, o.id).await?.map(|m| m.id), Some(e.id));

    let second = entrepreneur::create(&db, o.id, &digits(12), &digits(15), None).await;
    assert!(second.is_err());

    owner::hard_delete(&db, o.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_listing_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let o = owner::create(&db, "Catalog Owner", &unique_email(), None, "h").await?;
    let org = organization::create(
        &db,
        o.id,
        organization::NewOrganization { name: "Catalog Org".into(), ..Default::default() },
    )
    .await?;

    let s = service::create(
        &db,
        service::NewListing {
            name: "Window repair".into(),
            price: Some(1500.0),
            organization_id: Some(org.id),
            ..Default::default()
        },
    )
    .await?;
    let p = product::create(
        &db,
        service::NewListing {
            name: "Window frame".into(),
            price: Some(4200.0),
            organization_id: Some(org.id),
            ..Default::default()
        },
    )
    .await?;

    let services = service::list_by_organization(&db, org.id).await?;
    assert!(services.iter().any(|m| m.id == s.id));
    let products = product::list_by_organization(&db, org.id).await?;
    assert!(products.iter().any(|m| m.id == p.id));

    owner::hard_delete(&db, o.id).await?;
    assert!(service::Entity::find_by_id(s.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_meme_page_is_newest_first() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let tag = Uuid::new_v4();
    let first = meme::create(&db, &format!("old {tag}"), "d", "memes/a.png").await?;
    let second = meme::create(&db, &format!("new {tag}"), "d", "memes/b.png").await?;

    let page = meme::list_page(&db, 0, 50).await?;
    let pos_first = page.iter().position(|m| m.id == first.id);
    let pos_second = page.iter().position(|m| m.id == second.id);
    match (pos_first, pos_second) {
        (Some(a), Some(b)) => assert!(b <= a, "newer meme should come first"),
        _ => panic!("both memes should be on the first page"),
    }

    meme::hard_delete(&db, first.id).await?;
    meme::hard_delete(&db, second.id).await?;
    Ok(())
}
