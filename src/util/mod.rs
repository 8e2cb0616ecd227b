pub mod address;
pub mod constants;
pub mod conversions;
pub(crate) mod log;
pub mod logger;
pub mod options;
pub mod panic;
pub mod rust_util;
/// Test helpers, and a mock VM binding. Only built for tests or with the `mock_test` feature.
#[cfg(any(test, feature = "mock_test"))]
pub mod test_util;

pub use self::address::Address;
pub use self::address::ObjectReference;
