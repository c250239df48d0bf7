//! Request DTOs
//!
//! Query strings for the lookup endpoints. Bodies use
//! [`CustomerDto`](super::CustomerDto) directly.

use serde::Deserialize;

/// `?mobileNumber=` query parameter
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileNumberQuery {
    pub mobile_number: String,
}
