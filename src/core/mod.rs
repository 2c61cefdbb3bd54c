pub mod clock;
pub mod edit;
pub mod list;
pub mod log;
pub mod manager;
pub mod reporter;
pub mod status;
