//! Infrastructure Layer
//!
//! Session store and mail transport implementations.

pub mod memory;
pub mod sendmail;
