pub mod aggregate;
pub mod classify;
pub mod color;
pub mod report;
