//! Cyberdrill - Decision-tree training for cybercrime investigation procedures
//!
//! Trainees walk through authored decision trees; each choice is scored,
//! logged and compared against the recommended procedure.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
