pub mod error;
pub mod event;
pub mod expand;
pub mod fetch;
pub mod occurrence;
pub mod range;
#[cfg(any(test, feature = "test-util"))]
pub mod upstream;

#[cfg(test)]
mod fetch_tests;
