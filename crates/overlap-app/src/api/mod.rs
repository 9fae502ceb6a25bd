//! HTTP API: request types, envelopes, the overlap endpoint and routing

mod dto;
mod endpoint;
pub mod response;
mod router;

pub use dto::OverlapRequest;
pub use endpoint::{check_overlap, not_found, OverlapEndpoint};
pub use response::{default_code_mapping, CodeMapping, ResponseFormatter};
pub use router::{cors_layer, router, API_PREFIX};
