pub mod account;
pub mod render;
pub mod search;
