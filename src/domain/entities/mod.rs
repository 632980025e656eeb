pub mod auth;
pub mod vote;
