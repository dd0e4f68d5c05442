pub mod export_handlers;
pub mod optimize_handlers;
pub mod system_handlers;

pub use export_handlers::*;
pub use optimize_handlers::*;
pub use system_handlers::*;
