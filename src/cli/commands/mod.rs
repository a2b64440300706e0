mod app;
pub mod common;
mod config;
mod resolve;
mod search;
mod serve;
mod user;

pub use self::app::app;
pub use self::config::config;
pub use self::resolve::resolve;
pub use self::search::search;
pub use self::serve::serve;
pub use self::user::user;
