pub mod client;
pub mod embed;
pub mod models;
pub mod queries;
pub mod summary;
