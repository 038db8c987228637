pub mod ingest;
pub mod query;
pub mod scan;
