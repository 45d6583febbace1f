pub mod api_types;
pub mod client;
pub mod fetcher;
pub mod fields;
pub mod request;
pub mod types;

pub use client::JiraClient;
pub use fetcher::IssueFetcher;
pub use request::{Credentials, FieldCodes, IssueRequest};
