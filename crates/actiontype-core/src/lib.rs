//! `actiontype-core`: building, reviewing and registering Action Type records.
//!
//! ```text
//! CreationFlow ──edit──▶ FormFields
//!      │ submit
//!      ▼
//! PayloadBuilder ──▶ ConfirmationGate ──confirm──▶ Transport
//!                                                   │ ok
//!                                                   ▼
//!                        PendingRecord ──absorb──▶ ActionTypeRegistry
//! ```
//!
//! [`session::AdminSession`] owns all of the above and is what a
//! presentation layer drives.

pub mod config;
pub mod error;
pub mod flow;
pub mod gate;
pub mod io;
pub mod paths;
pub mod payload;
pub mod registry;
pub mod seed;
pub mod session;
pub mod structured;
pub mod transport;
pub mod types;

pub use error::{AdminError, Result};
