//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod suggest;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod owner_service;
pub mod organization_service;
pub mod entrepreneur_service;
pub mod catalog_service;
pub mod meme_service;
