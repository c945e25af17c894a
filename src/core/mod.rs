pub mod cli;
pub mod error;
pub mod logger;
pub mod types;

#[cfg(test)]
pub mod mock;
