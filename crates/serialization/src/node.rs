//! [`SerializerNode`]: one element of a serialization tree.
//!
//! A node holds an optional scalar value, a set of typed attributes and an
//! ordered list of named children. Lookups never fail: the `get_*` family
//! falls back to defaults or to the shared [`SerializerNode::null`] node,
//! while the `find_*` family reports absence with `Option`.

use std::collections::BTreeMap;

use tracing::{debug, error, warn};

use crate::value::SerializerValue;

static NULL_NODE: SerializerNode = SerializerNode::new();

/// What a child slot currently holds.
///
/// Removed slots keep their position so that indices of the surrounding
/// children do not shift; every lookup skips them.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildEntry {
    Present(Box<SerializerNode>),
    Removed,
}

/// A named entry in a node's ordered child list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildSlot {
    name: String,
    entry: ChildEntry,
}

impl ChildSlot {
    fn present(name: String, node: SerializerNode) -> Self {
        Self {
            name,
            entry: ChildEntry::Present(Box::new(node)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> &ChildEntry {
        &self.entry
    }

    pub fn node(&self) -> Option<&SerializerNode> {
        match &self.entry {
            ChildEntry::Present(node) => Some(&**node),
            ChildEntry::Removed => None,
        }
    }

    fn node_mut(&mut self) -> Option<&mut SerializerNode> {
        match &mut self.entry {
            ChildEntry::Present(node) => Some(&mut **node),
            ChildEntry::Removed => None,
        }
    }

    pub fn is_removed(&self) -> bool {
        matches!(self.entry, ChildEntry::Removed)
    }
}

/// Name-based matching shared by every by-name child lookup and count.
///
/// Empty-named slots are array placeholders and only match in array mode.
fn slot_matches(slot_name: &str, target: &str, deprecated: &str, array_mode: bool) -> bool {
    slot_name == target
        || (array_mode && slot_name.is_empty())
        || (!deprecated.is_empty() && slot_name == deprecated)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SerializerNode {
    value: SerializerValue,
    attributes: BTreeMap<String, SerializerValue>,
    children: Vec<ChildSlot>,
    array_of: Option<String>,
    deprecated_array_of: Option<String>,
}

impl Default for SerializerNode {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SerializerValue> for SerializerNode {
    fn from(value: SerializerValue) -> Self {
        Self::from_value(value)
    }
}

impl SerializerNode {
    /// Empty node: undefined value, no attributes, no children.
    pub const fn new() -> Self {
        Self {
            value: SerializerValue::Undefined,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            array_of: None,
            deprecated_array_of: None,
        }
    }

    pub fn from_value(value: impl Into<SerializerValue>) -> Self {
        let mut node = Self::new();
        node.value = value.into();
        node
    }

    /// The shared node returned by lookups that found nothing.
    ///
    /// It is only reachable through shared references, is never part of a
    /// tree and always has an undefined value.
    pub fn null() -> &'static SerializerNode {
        &NULL_NODE
    }

    pub fn is_null(&self) -> bool {
        std::ptr::eq(self, &NULL_NODE)
    }

    // -----------------------------------------------------------------------
    // Value
    // -----------------------------------------------------------------------

    /// The node's own value, or else its `"value"` attribute, or else an
    /// undefined value.
    pub fn get_value(&self) -> &SerializerValue {
        if self.value.is_undefined() {
            if let Some(value) = self.attributes.get("value") {
                return value;
            }
        }
        &self.value
    }

    /// Whether the node's own value is undefined. The `"value"` attribute
    /// is not considered.
    pub fn is_value_undefined(&self) -> bool {
        self.value.is_undefined()
    }

    pub fn set_value(&mut self, value: impl Into<SerializerValue>) -> &mut Self {
        self.value = value.into();
        self
    }

    pub fn set_bool_value(&mut self, value: bool) -> &mut Self {
        self.value.set_bool(value);
        self
    }

    pub fn set_int_value(&mut self, value: i32) -> &mut Self {
        self.value.set_int(value);
        self
    }

    pub fn set_double_value(&mut self, value: f64) -> &mut Self {
        self.value.set_double(value);
        self
    }

    pub fn set_string_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value.set_string(value);
        self
    }

    pub fn get_bool_value(&self) -> bool {
        self.get_value().get_bool()
    }

    pub fn get_int_value(&self) -> i32 {
        self.get_value().get_int()
    }

    pub fn get_double_value(&self) -> f64 {
        self.get_value().get_double()
    }

    pub fn get_string_value(&self) -> String {
        self.get_value().get_string()
    }

    // -----------------------------------------------------------------------
    // Attributes
    // -----------------------------------------------------------------------

    /// Insert or overwrite an attribute. Returns the node for chaining.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<SerializerValue>,
    ) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn set_bool_attribute(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.set_attribute(name, value)
    }

    pub fn set_int_attribute(&mut self, name: impl Into<String>, value: i32) -> &mut Self {
        self.set_attribute(name, value)
    }

    pub fn set_double_attribute(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.set_attribute(name, value)
    }

    pub fn set_string_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        let value: String = value.into();
        self.set_attribute(name, value)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<SerializerValue> {
        self.attributes.remove(name)
    }

    /// Attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &SerializerValue)> {
        self.attributes.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Resolve an attribute read through the compatibility chain: the
    /// attribute itself, then its deprecated name, then the own value of a
    /// child stored under either name.
    fn lookup_attribute(&self, name: &str, deprecated_name: &str) -> Option<&SerializerValue> {
        if let Some(value) = self.attributes.get(name) {
            return Some(value);
        }
        if !deprecated_name.is_empty() {
            if let Some(value) = self.attributes.get(deprecated_name) {
                return Some(value);
            }
        }
        if self.has_child(name, deprecated_name) {
            if let Some(child) = self.find_child(name, 0, deprecated_name) {
                if !child.is_value_undefined() {
                    return Some(child.get_value());
                }
            }
        }
        None
    }

    /// Read an attribute as a boolean.
    ///
    /// `deprecated_name`, when non-empty, is an older name accepted as a
    /// fallback. Data stored as a child element's own value is accepted
    /// too. Returns `default` when nothing matches.
    pub fn get_bool_attribute(&self, name: &str, default: bool, deprecated_name: &str) -> bool {
        match self.lookup_attribute(name, deprecated_name) {
            Some(value) => value.get_bool(),
            None => {
                debug!(name, default, "bool attribute not found, returning default");
                default
            }
        }
    }

    /// Read an attribute as text. Same fallbacks as [`Self::get_bool_attribute`].
    pub fn get_string_attribute(&self, name: &str, default: &str, deprecated_name: &str) -> String {
        match self.lookup_attribute(name, deprecated_name) {
            Some(value) => value.get_string(),
            None => {
                debug!(name, default, "string attribute not found, returning default");
                default.to_string()
            }
        }
    }

    /// Read an attribute as an integer. Same fallbacks as [`Self::get_bool_attribute`].
    pub fn get_int_attribute(&self, name: &str, default: i32, deprecated_name: &str) -> i32 {
        match self.lookup_attribute(name, deprecated_name) {
            Some(value) => value.get_int(),
            None => {
                debug!(name, default, "int attribute not found, returning default");
                default
            }
        }
    }

    /// Read an attribute as a double. Same fallbacks as [`Self::get_bool_attribute`].
    pub fn get_double_attribute(&self, name: &str, default: f64, deprecated_name: &str) -> f64 {
        match self.lookup_attribute(name, deprecated_name) {
            Some(value) => value.get_double(),
            None => {
                debug!(name, default, "double attribute not found, returning default");
                default
            }
        }
    }

    // -----------------------------------------------------------------------
    // Array mode
    // -----------------------------------------------------------------------

    /// Treat every child of this node as an element of an array named
    /// `name`. An empty name leaves array mode.
    pub fn consider_as_array(&mut self, name: impl Into<String>) -> &mut Self {
        self.consider_as_array_with_deprecated(name, "")
    }

    /// Like [`Self::consider_as_array`], additionally accepting children
    /// stored under an older group name.
    pub fn consider_as_array_with_deprecated(
        &mut self,
        name: impl Into<String>,
        deprecated_name: impl Into<String>,
    ) -> &mut Self {
        self.array_of = Some(name.into()).filter(|n| !n.is_empty());
        self.deprecated_array_of = Some(deprecated_name.into()).filter(|n| !n.is_empty());
        self
    }

    pub fn is_array(&self) -> bool {
        self.array_of.is_some()
    }

    pub fn array_of(&self) -> Option<&str> {
        self.array_of.as_deref()
    }

    pub fn deprecated_array_of(&self) -> Option<&str> {
        self.deprecated_array_of.as_deref()
    }

    // -----------------------------------------------------------------------
    // Children
    // -----------------------------------------------------------------------

    /// Append a new empty child and return it for population.
    ///
    /// On an array node, a name other than the group name is replaced by
    /// the group name.
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut SerializerNode {
        self.add_child_node(name, SerializerNode::new())
    }

    /// Append an already built child, with the same renaming as
    /// [`Self::add_child`].
    pub fn add_child_node(
        &mut self,
        name: impl Into<String>,
        node: SerializerNode,
    ) -> &mut SerializerNode {
        let mut name = name.into();
        if let Some(array_of) = &self.array_of {
            if name != *array_of {
                warn!(
                    name = %name,
                    array_of = %array_of,
                    "adding a child to an array node with a name different from the array elements; child was renamed"
                );
                name = array_of.clone();
            }
        }
        self.children.push(ChildSlot::present(name, node));
        match self.children.last_mut().and_then(ChildSlot::node_mut) {
            Some(child) => child,
            None => unreachable!("a present slot was just pushed"),
        }
    }

    fn position_at(&self, index: usize) -> Option<usize> {
        let Some(array_of) = self.array_of.as_deref() else {
            error!(index, "getting a child by index from a node which is not an array");
            return None;
        };
        let deprecated = self.deprecated_array_of.as_deref().unwrap_or("");

        let found = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_removed())
            .filter(|(_, slot)| {
                slot.name == array_of
                    || slot.name.is_empty()
                    || (!deprecated.is_empty() && slot.name == deprecated)
            })
            .nth(index)
            .map(|(position, _)| position);
        if found.is_none() {
            error!(index, array_of, "requested an out of bound child");
        }
        found
    }

    fn position_of(&self, name: &str, index: usize, deprecated_name: &str) -> Option<usize> {
        let name = match self.array_of.as_deref() {
            Some(array_of) if name != array_of => {
                warn!(
                    name,
                    array_of,
                    "getting a child from an array node with a name different from the array elements"
                );
                array_of
            }
            _ => name,
        };
        let array_mode = self.is_array();

        let found = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_removed())
            .filter(|(_, slot)| slot_matches(&slot.name, name, deprecated_name, array_mode))
            .nth(index)
            .map(|(position, _)| position);
        if found.is_none() {
            debug!(name, index, "child not found");
        }
        found
    }

    /// The `index`-th array element, or `None` if this node is not an array
    /// or has fewer elements.
    pub fn find_child_at(&self, index: usize) -> Option<&SerializerNode> {
        self.position_at(index)
            .and_then(|position| self.children[position].node())
    }

    /// The `index`-th child named `name` (or `deprecated_name` when
    /// non-empty). On an array node the group name is looked up instead of
    /// `name`, and empty-named placeholders match too.
    pub fn find_child(
        &self,
        name: &str,
        index: usize,
        deprecated_name: &str,
    ) -> Option<&SerializerNode> {
        self.position_of(name, index, deprecated_name)
            .and_then(|position| self.children[position].node())
    }

    /// Like [`Self::find_child_at`], or the null node.
    pub fn get_child_at(&self, index: usize) -> &SerializerNode {
        self.find_child_at(index).unwrap_or(&NULL_NODE)
    }

    /// First child named `name`, or the null node.
    pub fn get_child(&self, name: &str) -> &SerializerNode {
        self.get_child_with(name, 0, "")
    }

    /// Like [`Self::find_child`], or the null node.
    pub fn get_child_with(&self, name: &str, index: usize, deprecated_name: &str) -> &SerializerNode {
        self.find_child(name, index, deprecated_name)
            .unwrap_or(&NULL_NODE)
    }

    pub fn get_child_at_mut(&mut self, index: usize) -> Option<&mut SerializerNode> {
        let position = self.position_at(index)?;
        self.children[position].node_mut()
    }

    pub fn get_child_mut(
        &mut self,
        name: &str,
        index: usize,
        deprecated_name: &str,
    ) -> Option<&mut SerializerNode> {
        let position = self.position_of(name, index, deprecated_name)?;
        self.children[position].node_mut()
    }

    /// Number of children matching `name` (or `deprecated_name`).
    ///
    /// An empty `name` counts the array elements, which requires this node
    /// to be an array; otherwise it is reported and `0` is returned.
    pub fn get_children_count(&self, name: &str, deprecated_name: &str) -> usize {
        let (name, deprecated_name) = if name.is_empty() {
            let Some(array_of) = self.array_of.as_deref() else {
                error!("getting children count without a name from a node which is not an array");
                return 0;
            };
            (array_of, self.deprecated_array_of.as_deref().unwrap_or(""))
        } else {
            (name, deprecated_name)
        };
        let array_mode = self.is_array();

        self.children
            .iter()
            .filter(|slot| !slot.is_removed())
            .filter(|slot| slot_matches(&slot.name, name, deprecated_name, array_mode))
            .count()
    }

    /// Whether a child is stored under `name` or `deprecated_name`.
    /// Empty-named placeholders never count here.
    pub fn has_child(&self, name: &str, deprecated_name: &str) -> bool {
        self.children.iter().filter(|slot| !slot.is_removed()).any(|slot| {
            slot.name == name || (!deprecated_name.is_empty() && slot.name == deprecated_name)
        })
    }

    /// Mark every child named `name` as removed, keeping the positions of
    /// the others. Returns how many children were removed.
    pub fn remove_child(&mut self, name: &str) -> usize {
        let mut removed = 0;
        for slot in &mut self.children {
            if !slot.is_removed() && slot.name == name {
                slot.entry = ChildEntry::Removed;
                removed += 1;
            }
        }
        removed
    }

    /// Present children in order, with their stored names.
    pub fn children(&self) -> impl Iterator<Item = (&str, &SerializerNode)> {
        self.children
            .iter()
            .filter_map(|slot| slot.node().map(|node| (slot.name.as_str(), node)))
    }

    /// All slots in order, removed ones included.
    pub fn slots(&self) -> &[ChildSlot] {
        &self.children
    }
}
