//! siterestore - A strict, deterministic restore tool for multi-tenant site backups
//!
//! Restores per-site backups (database dump + public/private file archives)
//! from a local backup root or an S3-compatible object store, reconstructing
//! existing sites in place and provisioning brand-new ones.

pub mod archive;
pub mod cli;
pub mod config;
pub mod db;
pub mod fetch;
pub mod observability;
pub mod site;
pub mod snapshot;
