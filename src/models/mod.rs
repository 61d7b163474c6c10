pub mod rpc;
pub mod usuario;

pub use rpc::*;
pub use usuario::*;
