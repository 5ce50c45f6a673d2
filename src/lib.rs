//! Uniform data-access client for validating data across heterogeneous
//! SQL backends.
//!
//! A [`DataClient`] wraps one backend variant (anything implementing
//! [`Backend`]) and gives the validation engine a single surface for
//! connection lifecycle with lazy reconnect, dialect-parameterized SQL
//! construction, and results in record or tabular shape.

pub mod backend;
pub mod backends;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod partition;
pub mod table;
pub mod templates;

pub use backend::Backend;
pub use client::DataClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use filter::{FilterSpec, FilterType};
pub use partition::PartitionColumnType;
pub use table::{DataTable, QueryOutput, Record};
pub use templates::SqlTemplates;
