pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod hand;
pub mod notation;
pub mod pool;
pub mod readiness;
pub mod resolver;
pub mod scorer;
pub mod search;
pub mod tiles;
// cmd and reports belong to the binary crate (main.rs) and are exercised
// through the CLI integration tests.

pub use error::{MahjongError, MjResult};
