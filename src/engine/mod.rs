mod async_engine;
mod errors;
#[cfg(test)]
mod tests;

pub use async_engine::AnalyticsEngine;
pub use errors::LoadError;
