//! # IO Module
//!
//! Transport adapters over the domain services. The only one is the HTTP
//! REST API in `rest`.

pub mod rest;
