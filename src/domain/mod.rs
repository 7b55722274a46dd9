// Domain layer: rental records, property features and the ports the rest of the crate plugs into.

pub mod model;
pub mod ports;
