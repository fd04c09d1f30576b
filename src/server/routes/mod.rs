// HTTP routes
pub mod health;
pub mod houses;
pub mod options;

pub use health::*;
pub use houses::*;
pub use options::*;
