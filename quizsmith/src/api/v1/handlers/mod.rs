pub(crate) mod health;
pub mod quizzes;

pub use health::health_check;
