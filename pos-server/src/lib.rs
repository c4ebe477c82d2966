//! BuffetPOS server
//!
//! Table lifecycle and dual-mode authentication for a buffet restaurant:
//! staff manage and assign tables with a bearer token, customers reach their
//! table with the access code minted at assignment.
//!
//! ```text
//! pos-server/src/
//! ├── core/      # config, state, server, startup errors
//! ├── auth/      # JWT, access codes, role gate, middleware, extractors
//! ├── tables/    # state machine, table service
//! ├── users/     # staff registration and login
//! ├── db/        # SQLite pool, migrations, repositories
//! ├── api/       # HTTP handlers
//! ├── routes/    # router assembly, tower-http layers
//! └── utils/     # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod routes;
pub mod tables;
pub mod users;
pub mod utils;

pub use auth::{CurrentUser, CustomerTable, JwtService};
pub use core::{Config, Server, ServerState};
pub use routes::build_app;
pub use utils::logger::init_logger_with_file;
pub use utils::{AppError, AppResult};

/// Security event on the `security` target
///
/// ```ignore
/// security_log!("WARN", "auth_failed", path = path.to_string());
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
