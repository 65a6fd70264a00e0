pub mod config;
pub mod host;
pub mod i18n;
pub mod retry;
pub mod storage;
