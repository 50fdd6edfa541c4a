pub mod env;
#[cfg(feature = "recursive")]
pub mod file_list;
pub mod file_status;
