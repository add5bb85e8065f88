// Job postings: storage queries and the HTTP handlers that drive them.

pub mod handlers;
pub mod store;
