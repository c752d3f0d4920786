pub mod evaluation_repository;
pub mod user_repository;

pub use evaluation_repository::{EvaluationRepository, MongoEvaluationRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
