mod app;
mod config;
mod engine;
mod input;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use engine::{EngineError, EngineResult, OrderMismatch};
pub use input::InputError;
pub use validation::ValidationError;
