pub mod aggregate;
pub mod clock;
pub mod error;
pub mod output;
pub mod report;
pub mod summary;
