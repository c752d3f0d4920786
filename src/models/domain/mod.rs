pub mod evaluation;
pub mod user;

pub use evaluation::{Evaluation, EvaluationPatch, EvaluationStatus};
pub use user::{User, UserRole};
