//! Ports (interfaces) implemented by the infrastructure layer

pub mod model_gateway;

pub use model_gateway::{GatewayError, ModelGateway};
