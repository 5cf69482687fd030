use sea_orm::{DatabaseConnection, EntityTrait};

use crate::auth::domain::Principal;
use crate::auth::errors::AuthError;
use crate::auth::repository::PrincipalRepository;

pub struct SeaOrmPrincipalRepository {
    pub db: DatabaseConnection,
}

fn to_principal(m: models::owner::Model) -> Principal {
    Principal { id: m.id, name: m.name, email: m.email, phone: m.phone }
}

#[async_trait::async_trait]
impl PrincipalRepository for SeaOrmPrincipalRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, AuthError> {
        let res = models::owner::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_principal))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, AuthError> {
        let res = models::owner::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_principal))
    }

    async fn create_owner(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        password_hash: &str,
    ) -> Result<Principal, AuthError> {
        let created = models::owner::create(&self.db, name, email, phone, password_hash)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Validation(v) => AuthError::Validation(v),
                models::errors::ModelError::Db(d) => AuthError::Repository(d),
            })?;
        Ok(to_principal(created))
    }

    async fn get_password_hash(&self, id: i64) -> Result<Option<String>, AuthError> {
        let res = models::owner::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|m| m.password_hash))
    }
}
