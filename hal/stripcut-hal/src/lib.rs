//! Stripcut Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The core crate only talks to persistent memory
//! through these traits, so the same application code runs against the
//! RP2040 flash backend or a RAM buffer in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (stripcut-core, firmware)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stripcut-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ stripcut-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::ByteStorage`] - Byte-addressable persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod storage;

pub use storage::{ByteStorage, StorageError};
