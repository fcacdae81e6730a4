// HTTP routes
pub mod enrich;
pub mod health;
pub mod score;

pub use enrich::*;
pub use health::*;
pub use score::*;
