use serde::Serialize;

/// Body of the liveness endpoint.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
