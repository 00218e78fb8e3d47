pub mod entities;
pub mod pages;
