//! Event publishing adapters.

mod logging_publisher;

pub use logging_publisher::LoggingEventPublisher;
