pub mod commands;
pub mod error;
pub mod models;
pub mod pages;
pub mod remote;
pub mod utils;
