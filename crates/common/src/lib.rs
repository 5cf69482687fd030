//! Pieces shared across crates: logging setup, Prometheus metrics,
//! startup environment checks and small wire types.

pub mod env;
pub mod metrics;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
