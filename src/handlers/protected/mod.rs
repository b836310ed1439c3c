pub mod account;
pub mod binders;
pub mod catalog;
