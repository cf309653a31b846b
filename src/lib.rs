pub mod api;
pub mod arrangement;
pub mod config;
pub mod consts;
pub mod error;
pub mod optimizer;
pub mod registry;
pub mod scorer;
pub mod stats;
