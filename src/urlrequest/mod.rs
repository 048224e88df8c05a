//! Request description and the job that executes it.

pub mod job;
pub mod parsedurl;
pub mod request;
pub mod trace;

pub use job::URLRequestHttpJob;
pub use parsedurl::ParsedUrl;
pub use request::URLRequest;
