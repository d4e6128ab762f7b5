pub mod gateway;

pub use gateway::{ConnectOptions, GatewayConnection, GatewayConnector};
