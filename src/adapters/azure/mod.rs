pub mod appservice;
pub mod monitor;
pub mod storage;
