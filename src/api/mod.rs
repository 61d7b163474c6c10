pub mod health;
pub mod metrics;
pub mod rpc;
pub mod swagger;
pub mod usuarios;
