pub mod decoder;
pub mod headers;
pub mod parser;
pub mod redirect;
pub mod requestbuilder;
pub mod response;

// Re-exports for convenience
pub use headers::ResponseHeaders;
pub use response::HttpResponse;
