pub mod evaluation_service;
pub mod identity_service;

pub use evaluation_service::EvaluationService;
pub use identity_service::IdentityService;
