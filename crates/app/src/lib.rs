//! Stepshop client: session, backend gateway and the services that drive the
//! cart, trophies and account against it.

pub mod config;
pub mod context;
pub mod domain;
pub mod gateway;
pub mod observability;
pub mod session;

#[cfg(test)]
mod test;
