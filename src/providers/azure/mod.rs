pub mod appservice;
pub mod monitor;
pub mod storage;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Azure {
    pub appservice: appservice::AppService,
    pub monitor: monitor::Monitor,
    pub storage: storage::Storage,
}
