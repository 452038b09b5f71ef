//! SeaORM entities.

pub mod user;
