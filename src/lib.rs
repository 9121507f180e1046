pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod photo;
pub mod prelude;
pub mod storage;
