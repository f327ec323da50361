//! Shared test infrastructure

pub mod mock_engine;
pub mod test_helpers;

#[allow(unused_imports)]
pub use mock_engine::{Event, MockEngine, MockProbe};
