pub mod alignment;
pub mod cache;
pub mod config;
pub mod errors;
pub mod initialization;
pub mod manager_swpc;
pub mod manager_xras;
pub mod models;
pub mod service;
pub mod synthetic;
pub mod upstream;
pub mod worker;
