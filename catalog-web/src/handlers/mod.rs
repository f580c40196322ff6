pub mod extensions;
pub mod health;

pub use extensions::*;
pub use health::*;
