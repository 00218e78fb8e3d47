pub mod i18n;
pub mod paths;
pub mod resolver;
pub mod tenancy;
