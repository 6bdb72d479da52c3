//! Selection trees and default-selection derivation.

use std::fmt;

use crate::argument::{ArgValue, Argument};
use crate::descriptor::{Entity, EntityDescriptor, Shape};
use crate::logging::targets;

/// One node of a GraphQL selection set.
///
/// A node with no children is a leaf. Arguments and children keep the
/// order they were added in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    name: String,
    arguments: Vec<Argument>,
    children: Vec<Selection>,
}

impl Selection {
    /// Create a leaf selection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a selection whose children are `T`'s default selection.
    pub fn entity<T: Entity>(name: impl Into<String>) -> Self {
        Self::new(name).with_children(T::default_selection())
    }

    /// Add an argument.
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.arguments.push(Argument::new(name, value));
        self
    }

    /// Add an argument only when `value` is `Some`.
    pub fn optional_argument<V: Into<ArgValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.argument(name, value),
            None => self,
        }
    }

    /// Add several arguments.
    pub fn arguments(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    /// Append a child selection.
    pub fn child(mut self, child: Selection) -> Self {
        self.children.push(child);
        self
    }

    /// Replace the children with an explicit list.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Selection>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn argument_list(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn children(&self) -> &[Selection] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a direct child by name.
    pub fn find_child(&self, name: &str) -> Option<&Selection> {
        self.children.iter().find(|child| child.name == name)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_str(")")?;
        }
        if !self.children.is_empty() {
            f.write_str(" ")?;
            write_set(f, &self.children)?;
        }
        Ok(())
    }
}

/// Write `{ a b { c } }`.
pub(crate) fn write_set(f: &mut fmt::Formatter<'_>, selections: &[Selection]) -> fmt::Result {
    f.write_str("{")?;
    for selection in selections {
        write!(f, " {selection}")?;
    }
    f.write_str(" }")
}

/// Derive the default selection set for a descriptor.
///
/// Scalar fields become leaves; composite fields (and collections of
/// composites) expand to the nested type's selectable fields. A field whose
/// type is already being expanded higher up the current path is omitted,
/// and so is a composite field left with no children.
pub fn selections_for(descriptor: &'static EntityDescriptor) -> Vec<Selection> {
    let mut path = Vec::new();
    expand(descriptor, &mut path)
}

fn expand(
    descriptor: &'static EntityDescriptor,
    path: &mut Vec<&'static EntityDescriptor>,
) -> Vec<Selection> {
    path.push(descriptor);

    let mut selections = Vec::new();
    for field in descriptor.selectable_fields() {
        match (field.shape)().element() {
            Shape::Object(nested) => {
                let nested = nested();
                if path.iter().any(|seen| std::ptr::eq(*seen, nested)) {
                    tracing::debug!(
                        target: targets::SELECTION,
                        owner = descriptor.type_name,
                        field = field.remote_name,
                        nested = nested.type_name,
                        "omitting field that re-enters a type on the current path"
                    );
                    continue;
                }
                let children = expand(nested, path);
                if children.is_empty() {
                    tracing::debug!(
                        target: targets::SELECTION,
                        owner = descriptor.type_name,
                        field = field.remote_name,
                        "omitting composite field with an empty selection"
                    );
                    continue;
                }
                selections.push(Selection::new(field.remote_name).with_children(children));
            }
            _ => selections.push(Selection::new(field.remote_name)),
        }
    }

    path.pop();
    selections
}
