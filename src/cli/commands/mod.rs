mod command_result;
pub mod harvest;
pub mod harvest_file;
pub mod helper;
pub mod init;
pub mod status;

pub use command_result::*;
