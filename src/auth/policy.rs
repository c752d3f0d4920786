use mongodb::bson::oid::ObjectId;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{User, UserRole},
};

/// Role-allowlist rule: the endpoint declares which roles may call it.
pub fn require_role(user: &User, allowed: &[UserRole]) -> AppResult<()> {
    if !allowed.contains(&user.role) {
        return Err(AppError::Forbidden("Insufficient permissions".to_string()));
    }
    Ok(())
}

/// Ownership-or-admin rule for operations on a specific resource.
/// Callers must confirm the resource exists first: a missing resource is
/// `NotFound`, not `Forbidden`, even for non-owners.
pub fn require_owner_or_admin(user: &User, owner: &ObjectId) -> AppResult<()> {
    if user.role != UserRole::Admin && user.id != *owner {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }
    Ok(())
}
