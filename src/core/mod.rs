pub mod api;
pub mod config;
pub mod constants;
pub mod guard;
pub mod progress;
pub mod request;

pub use api::*;
pub use config::*;
pub use constants::*;
pub use guard::*;
pub use progress::*;
pub use request::*;
