//! Request/Response data transfer objects

pub mod lease;
pub mod advance;
pub mod invoice;
