//! HTTP calling convention shared by every outbound request.
//!
//! # Module Structure
//!
//! - `method`: the enumerated set of supported verbs
//! - `error`: the normalized error shape every failure is reshaped into
//! - `response`: the successful response envelope
//! - `gateway`: the `ApiGateway` trait, request options and header merging

mod error;
mod gateway;
mod method;
mod response;

pub use error::{API_ERROR_NAME, ApiError, CANCELED_ERROR_NAME};
pub use gateway::{
    ApiGateway, AUTHORIZATION_HEADER, BYPASS_HEADER, BYPASS_HEADER_VALUE, RequestOptions,
    merge_headers,
};
pub use method::HttpMethod;
pub use response::ApiResponse;
