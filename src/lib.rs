pub mod api;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod error;
pub mod optimizer;
pub mod scorer;
// cmd and reports belong to the binary (main.rs).
