//! Trait definitions for Project Server operations.
//!
//! [`Kind`] describes an entity kind; the operation traits are implemented by
//! the lazily evaluated handles ([`Instance`](crate::Instance) and
//! [`Collection`](crate::Collection)) for the kinds that support them.

mod add;
mod delete;
mod get;
mod kind;
mod list;
mod update;

pub use add::Add;
pub use delete::Delete;
pub use get::Get;
pub use kind::{Creatable, Deletable, Kind};
pub use list::{List, DEFAULT_MAX_PAGES};
pub use update::Update;
