// Domain layer: request/response models, the policy table and ports (interfaces).

pub mod model;
pub mod policy;
pub mod ports;
