pub mod bootstrap;
pub mod config;
pub mod pages;
pub mod server;
pub mod util;
