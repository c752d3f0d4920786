use crate::models::domain::{Evaluation, EvaluationStatus, User, UserRole};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard test user
    pub fn test_user() -> User {
        User::new("test@example.com", "hash", "Test User", UserRole::User)
    }

    /// Creates a test admin
    pub fn test_admin() -> User {
        User::new("admin@example.com", "hash", "Test Admin", UserRole::Admin)
    }

    /// Creates an evaluation owned by the given user
    pub fn test_evaluation(owner: &User) -> Evaluation {
        Evaluation::new(
            "Test evaluation".to_string(),
            Some("A fixture".to_string()),
            Some(75.0),
            EvaluationStatus::Pending,
            owner.id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::UserRole;

    #[test]
    fn test_fixture_users() {
        assert_eq!(test_user().role, UserRole::User);
        assert_eq!(test_admin().role, UserRole::Admin);
    }

    #[test]
    fn test_fixture_evaluation_owner() {
        let user = test_user();
        let evaluation = test_evaluation(&user);
        assert_eq!(evaluation.created_by, user.id);
    }
}
