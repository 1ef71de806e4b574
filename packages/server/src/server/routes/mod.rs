// HTTP routes
pub mod analyze;
pub mod health;
pub mod proxy;

pub use analyze::*;
pub use health::*;
pub use proxy::*;
