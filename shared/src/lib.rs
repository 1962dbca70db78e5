pub mod api;
pub mod error;
pub mod models;
pub mod services;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
