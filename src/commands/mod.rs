pub mod init;
pub mod remove;
pub mod setup;
pub mod status;
