// Domain layer: persisted record, response payloads and the ports the core talks through.

pub mod model;
pub mod ports;
