pub mod auth;
pub mod context;
pub mod entities;
pub mod tenancy;
