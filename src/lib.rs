pub mod app;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod output;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;
