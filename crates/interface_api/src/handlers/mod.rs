//! Request handlers

pub mod health;
pub mod lease;
pub mod advance;
pub mod invoice;
