//! Application Layer
//!
//! Contains the account workflow service, data transfer objects (DTOs) and
//! the mapping between DTOs and domain entities.

pub mod dto;
pub mod mapper;
pub mod services;
