//! Database connection

pub mod mongo;

pub use mongo::MongoClient;
