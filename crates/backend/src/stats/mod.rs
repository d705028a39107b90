pub mod csv_export;
pub mod query;
pub mod repository;
pub mod service;
