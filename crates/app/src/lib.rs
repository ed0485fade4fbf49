//! Shared application domain, persistence and workflow modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod entropy;
pub mod exports;
pub mod notifications;
pub mod settings;
pub mod workflow;

#[cfg(test)]
mod test;
