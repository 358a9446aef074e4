// CV upload and analysis: text extraction, regex heuristics, S3 + Postgres storage.

pub mod analysis;
pub mod extract;
pub mod handlers;
pub mod store;
