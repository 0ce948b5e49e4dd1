// Domain layer: cart model and ports (interfaces) for the storefront API, storage and notifications.

pub mod model;
pub mod ports;
