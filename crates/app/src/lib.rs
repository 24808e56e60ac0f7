//! Cart, order and checkout domain services with their `PostgreSQL` persistence.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;
