//! Account

pub mod errors;
pub mod service;

pub use errors::AccountError;
pub use service::AccountService;
