//! Configuration types module

pub mod app;
pub mod backend;
pub mod classification;
pub mod event_bus;
pub mod history;
pub mod logging;
pub mod refresh;

// Re-export main types
pub use app::*;
pub use backend::*;
pub use classification::*;
pub use event_bus::*;
pub use history::*;
pub use logging::*;
pub use refresh::*;
