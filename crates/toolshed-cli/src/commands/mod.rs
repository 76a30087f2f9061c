//! CLI command implementations

pub mod booking;
pub mod catalog;
pub mod init;
pub mod migrate;
pub mod seed;
pub mod serve;
pub mod validate;
