//! gd-core-serialization - format-agnostic serialization tree.
//!
//! Project data is held in memory as a tree of [`SerializerNode`]s before a
//! format writer turns it into text or bytes, and after a format reader has
//! parsed it. Every node carries:
//!
//! - an optional scalar [`SerializerValue`],
//! - named attributes, each a typed scalar,
//! - an ordered list of named children, which may be treated as an array.
//!
//! Reads are tolerant so that data written by older versions still loads:
//! attributes accept a deprecated name and values stored as child elements,
//! array nodes accept a deprecated group name, and failed lookups fall back
//! to defaults or to [`SerializerNode::null`] while logging a diagnostic
//! through `tracing`.

mod node;
mod value;

pub use node::{ChildEntry, ChildSlot, SerializerNode};
pub use value::SerializerValue;
