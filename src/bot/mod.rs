pub mod callback;
pub mod commands;
pub mod context;
pub mod flow;
pub mod handlers;
pub mod session;
pub mod style;

pub type HandlerResult = anyhow::Result<()>;

pub use commands::Command;
pub use context::AppContext;
pub use context::Owner;
pub use handlers::build_schema;
pub use handlers::dispatch_update;
