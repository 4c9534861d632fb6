//! Presentation Layer
//!
//! HTTP handlers, DTOs and response rendering for the contact endpoint.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
