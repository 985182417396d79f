//! The content model: schemas, locales, metadata and raw values.
//!
//! Everything here is plain data. Resolution lives in [`crate::engine`].

pub mod content_type;
pub mod date;
pub mod error;
pub mod field;
pub mod locale;
pub mod sys;
pub mod value;

pub use content_type::*;
pub use date::*;
pub use error::*;
pub use field::*;
pub use locale::*;
pub use sys::*;
pub use value::*;
