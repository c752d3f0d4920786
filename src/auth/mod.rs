pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod policy;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use policy::{require_owner_or_admin, require_role};
