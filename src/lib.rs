//! argweave: priority resolution of named field values.
//!
//! Declare fields once in a [`Schema`], then let a [`Resolver`] compute each
//! field by merging command-line flags, caller overrides, a [`ConfigStore`],
//! and declared defaults, in that order. Textual values may reference earlier
//! fields with `{name}` placeholders.
//!
//! ```
//! use argweave::{Field, FieldKind, MemoryStore, Resolver, Schema};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::builder("DbConf")
//!     .prefix("db")
//!     .field(Field::new("host").default("localhost").help("database host"))
//!     .field(Field::new("port").kind(FieldKind::Int).config_key("db.port").default(5432))
//!     .field(Field::new("url").default("{host}:{port}"))
//!     .build()?;
//!
//! let store = MemoryStore::new().with("db.port", 6000);
//! let values = Resolver::new(&schema)
//!     .args(["--db_host", "10.0.0.8"])
//!     .config(&store)
//!     .resolve()?;
//!
//! assert_eq!(values.get("url").map(ToString::to_string), Some("10.0.0.8:6000".into()));
//! # Ok(())
//! # }
//! ```

mod template;

pub mod config;
pub mod error;
pub mod field;
pub mod resolve;
pub mod resolved;
pub mod schema;
pub mod value;

pub use config::{ConfigStore, FileStore, MemoryStore};
pub use error::{ResolveError, SchemaError};
pub use field::{Field, FieldKind};
pub use resolve::Resolver;
pub use resolved::{ResolvedValues, PRETTIFY_WIDTH};
pub use schema::{flag_name, Schema, SchemaBuilder};
pub use value::Value;
