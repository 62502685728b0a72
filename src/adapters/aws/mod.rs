pub mod apigateway;
pub mod msk;
pub mod vpc;
