//! Operation composition.
//!
//! An [`Operation`] is the top of a selection tree: a kind (query or
//! mutation), an optional name with variable definitions, and the root
//! selections. [`Operation::render`] produces the document sent over the
//! wire. No validation against the remote schema is performed here.

use std::fmt;

use crate::selection::{Selection, write_set};

/// The kind of root operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationType {
    #[default]
    Query,
    Mutation,
}

impl OperationType {
    pub fn keyword(self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A `$name: Type` variable definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    pub type_name: String,
}

impl fmt::Display for VariableDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}: {}", self.name, self.type_name)
    }
}

/// A complete GraphQL operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationType,
    name: Option<String>,
    variables: Vec<VariableDefinition>,
    selections: Vec<Selection>,
}

impl Operation {
    fn new(kind: OperationType, root: Selection) -> Self {
        Self {
            kind,
            name: None,
            variables: Vec::new(),
            selections: vec![root],
        }
    }

    /// Start a query with one root selection.
    pub fn query(root: Selection) -> Self {
        Self::new(OperationType::Query, root)
    }

    /// Start a mutation with one root selection.
    pub fn mutation(root: Selection) -> Self {
        Self::new(OperationType::Mutation, root)
    }

    /// Name the operation.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare a variable, e.g. `variable("id", "Int")`.
    pub fn variable(mut self, name: impl AsRef<str>, type_name: impl Into<String>) -> Self {
        self.variables.push(VariableDefinition {
            name: name.as_ref().trim_start_matches('$').to_owned(),
            type_name: type_name.into(),
        });
        self
    }

    /// Add another root selection.
    pub fn selection(mut self, selection: Selection) -> Self {
        self.selections.push(selection);
        self
    }

    pub fn kind(&self) -> OperationType {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn variables(&self) -> &[VariableDefinition] {
        &self.variables
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Render the operation document.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.keyword())?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        if !self.variables.is_empty() {
            if self.name.is_none() {
                f.write_str(" ")?;
            }
            f.write_str("(")?;
            for (i, variable) in self.variables.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{variable}")?;
            }
            f.write_str(")")?;
        }
        f.write_str(" ")?;
        write_set(f, &self.selections)
    }
}
