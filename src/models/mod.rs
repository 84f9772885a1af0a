pub mod categories;
pub mod evaluations;
pub mod messages;
pub mod proposals;
pub mod provider_services;
pub mod requests;
pub mod users;
