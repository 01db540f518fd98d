pub mod config;
pub mod date;
pub mod error;
pub mod roster;
pub mod table;

pub use config::Config;
pub use error::*;
pub use roster::*;
pub use table::*;
