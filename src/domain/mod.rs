// Domain layer: catalogs, form models and ports (interfaces). No external dependencies beyond serde/chrono.

pub mod catalog;
pub mod model;
pub mod ports;
pub mod rated_list;
