// Domain layer: dataset models, ports (interfaces) and the classification
// taxonomy. No I/O here.

pub mod model;
pub mod ports;
pub mod taxonomy;
