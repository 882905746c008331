pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod persistence;
pub mod router;

#[cfg(test)]
pub mod testing;
