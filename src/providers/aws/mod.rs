pub mod apigateway;
pub mod msk;
pub mod vpc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aws {
    pub apigateway: apigateway::ApiGateway,
    pub msk: msk::Msk,
    pub vpc: vpc::Vpc,
}
