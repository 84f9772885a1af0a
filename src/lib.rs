pub mod auth;
pub mod cache;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;

pub use db::create_pool;
