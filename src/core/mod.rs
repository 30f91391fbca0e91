pub mod config;
#[cfg(feature = "native")]
pub mod dispatch;
pub mod service;
pub mod view;
