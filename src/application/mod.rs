pub mod app_error;
pub mod authorization;
pub mod jwt;
pub mod use_cases;
pub mod validators;
