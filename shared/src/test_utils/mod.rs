pub mod http_test_utils;
pub mod mock_transport;
pub mod test_logging;
