pub mod server;
pub mod services;
pub mod store;
pub mod version;
pub mod web;
