//! Lambda function, layer, alias, concurrency and event source mapping records

mod types;

pub use types::*;
