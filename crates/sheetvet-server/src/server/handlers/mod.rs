//! API request handlers.

mod health;
mod save;
mod validate;

pub use health::*;
pub use save::*;
pub use validate::*;
