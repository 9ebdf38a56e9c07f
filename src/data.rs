pub mod account;
pub mod domain;
