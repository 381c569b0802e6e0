pub mod candidatura;
pub mod empleado;

use serde::Serialize;

/// `{"detail": "..."}` acknowledgement returned by mutating endpoints.
#[derive(Debug, Serialize)]
pub struct Detail {
    pub detail: &'static str,
}
