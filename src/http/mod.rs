//! HTTP protocol layer module
//!
//! Provides response building and form decoding, decoupled from specific
//! business logic.

pub mod form;
pub mod response;

// Re-export commonly used types
pub use form::FormBody;
pub use response::{
    build_400_response, build_404_response, build_500_response, build_501_response,
    build_created_response, build_json_response, build_no_content_response,
};
