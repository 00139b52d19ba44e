//! Background Tasks Module
//!
//! Contains tasks that run alongside the store during server operation.
//!
//! # Tasks
//! - Expiry writer: Appends expired records to a durable file

mod writer;

pub use writer::spawn_expiry_writer;
