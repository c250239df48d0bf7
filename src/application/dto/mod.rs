//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod customer;
pub mod request;
pub mod response;

pub use customer::{AccountsDto, CustomerDto};
pub use request::MobileNumberQuery;
pub use response::ResponseDto;
