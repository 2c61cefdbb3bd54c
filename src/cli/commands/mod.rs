pub mod config;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod status;
pub mod watch;
