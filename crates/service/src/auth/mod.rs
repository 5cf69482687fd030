//! Auth module: stateless credentials over a principal repository.
//!
//! The codec signs and checks tokens, the issuer mints access/refresh pairs,
//! the guard resolves a bearer token to an owner, and `AuthService` ties the
//! pieces together for registration and login.

pub mod codec;
pub mod domain;
pub mod errors;
pub mod guard;
pub mod repo;
pub mod repository;
pub mod service;
pub mod session;

pub use guard::AccessGuard;
pub use service::{AuthConfig, AuthService};
pub use session::SessionIssuer;
