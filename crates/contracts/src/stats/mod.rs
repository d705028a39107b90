pub mod config;
pub mod group;
pub mod request;
pub mod table;

pub use config::*;
pub use group::*;
pub use request::*;
pub use table::*;
