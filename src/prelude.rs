//! Prelude module for convenient imports.
//!
//! ```ignore
//! use with_fetch_mock::prelude::*;
//! ```

pub use crate::adapters::FetchMock;
pub use crate::error::{BoxError, MockResult, WithMockError};
pub use crate::mock::{Mock, Reply};
pub use crate::traits::{HttpClient, MockRegistry, Request, Response};
pub use crate::with_mock::{with_fetch_mock, WithMock, WithMockConfig};
