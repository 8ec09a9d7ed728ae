pub mod connection;
pub mod memory;
pub mod models;
pub mod pg_store;
pub mod repos;
pub mod schema;
pub mod seed;
pub mod store;
