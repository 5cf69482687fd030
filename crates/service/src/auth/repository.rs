use async_trait::async_trait;

use super::domain::Principal;
use super::errors::AuthError;

/// Repository abstraction for principal persistence.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, AuthError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, AuthError>;
    async fn create_owner(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        password_hash: &str,
    ) -> Result<Principal, AuthError>;
    async fn get_password_hash(&self, id: i64) -> Result<Option<String>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPrincipalRepository {
        next_id: AtomicI64,
        owners: Mutex<HashMap<i64, Principal>>,
        hashes: Mutex<HashMap<i64, String>>,
    }

    impl MockPrincipalRepository {
        /// Remove an owner, simulating account deletion after a token was issued.
        pub fn remove(&self, id: i64) {
            self.owners.lock().unwrap().remove(&id);
            self.hashes.lock().unwrap().remove(&id);
        }
    }

    #[async_trait]
    impl PrincipalRepository for MockPrincipalRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, AuthError> {
            let owners = self.owners.lock().unwrap();
            Ok(owners.values().find(|o| o.email == email).cloned())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, AuthError> {
            let owners = self.owners.lock().unwrap();
            Ok(owners.get(&id).cloned())
        }

        async fn create_owner(
            &self,
            name: &str,
            email: &str,
            phone: Option<&str>,
            password_hash: &str,
        ) -> Result<Principal, AuthError> {
            let mut owners = self.owners.lock().unwrap();
            if owners.values().any(|o| o.email == email) {
                return Err(AuthError::Conflict);
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let owner = Principal {
                id,
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.map(|p| p.to_string()),
            };
            owners.insert(id, owner.clone());
            self.hashes.lock().unwrap().insert(id, password_hash.to_string());
            Ok(owner)
        }

        async fn get_password_hash(&self, id: i64) -> Result<Option<String>, AuthError> {
            let hashes = self.hashes.lock().unwrap();
            Ok(hashes.get(&id).cloned())
        }
    }
}
