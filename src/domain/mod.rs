// Domain layer: weather models, the condition table and the ports the workflow talks to.

pub mod conditions;
pub mod model;
pub mod ports;
