pub mod controller;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_suppliers_router;
