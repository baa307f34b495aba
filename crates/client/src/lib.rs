//! Client side of the JSONQuery fixture.
//!
//! [`field_data::JsonFieldData`] is a JSON object with typed accessors, and
//! [`http::JsonQueryClient`] posts or fetches those objects over HTTP. Together
//! they let a test harness check its own JSON encoding against the fixture
//! server's echo.

pub mod error;
pub mod field_data;
pub mod http;

pub use error::{ClientError, JsonResult};
pub use field_data::JsonFieldData;
pub use http::{create_url, JsonQueryClient};
