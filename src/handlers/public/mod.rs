pub mod cards;
pub mod catalog;
pub mod session;
pub mod system;
