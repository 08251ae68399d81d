#![forbid(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod extract;
pub mod keys;
pub mod load;
pub mod logging;
pub mod payload;
pub mod records;
pub mod tables;
pub mod transport;
