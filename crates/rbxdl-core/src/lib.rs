pub mod config;
pub mod logging;

pub mod category;
pub mod checksum;
pub mod flow;
pub mod identifier;
pub mod markup;
pub mod naming;
pub mod relay;
pub mod save;
pub mod stats;
pub mod validate;
