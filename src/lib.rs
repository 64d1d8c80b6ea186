pub mod constants;
mod allowed_headers;
mod allowed_methods;
mod context;
mod header_builder;
mod headers;
mod interceptor;
mod origin;
mod policy;
mod raw;
mod result;
mod sanitize;
mod status;
mod store;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::{AllowedMethods, Method};
pub use context::RequestContext;
pub use header_builder::{HeaderBuilder, build};
pub use headers::{Headers, merge_headers};
pub use interceptor::{PolicySource, RequestInterceptor, Transport};
pub use origin::{MatchResult, match_origin};
pub use policy::Policy;
pub use raw::RawPolicy;
pub use result::{CorsDecision, InterceptorState};
pub use sanitize::{is_valid_origin_entry, sanitize, sanitize_origins};
pub use status::StatusReport;
pub use store::{MemoryStorage, PolicyStorage, PolicyStore, StoreError};
