pub mod client;
pub mod flash;
pub mod package;
