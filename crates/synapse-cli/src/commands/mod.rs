pub mod init;
pub mod prefs;
pub mod take;
pub mod themes;
pub mod validate;
