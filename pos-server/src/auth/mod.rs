//! Authentication and authorization
//!
//! - [`JwtService`] - staff bearer token issue/verify
//! - [`AccessCodeVerifier`] - customer access code resolution
//! - [`RoleGate`] - role check for staff routes
//! - [`require_staff_auth`], [`require_role`], [`require_access_code`] - middleware

pub mod access_code;
pub mod extractor;
pub mod gate;
pub mod jwt;
pub mod middleware;

pub use access_code::{ACCESS_CODE_HEADER, AccessCodeGenerator, AccessCodeVerifier, CustomerTable};
pub use gate::RoleGate;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_access_code, require_role, require_staff_auth};
