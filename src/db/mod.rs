pub mod initialize;
pub mod lock;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod repository;
