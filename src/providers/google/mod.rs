pub mod gke;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Google {
    pub gke: gke::Gke,
}
