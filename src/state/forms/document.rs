//! Form document tree
//!
//! A record form is a small tree of container and input nodes, addressed by
//! arena indices. Containers may carry a row marker class; every node has an
//! inline display state. Rendering and the visibility rules both work on
//! this tree, so "hidden" means the same thing everywhere.

use super::field::FormField;
use thiserror::Error;

/// Errors raised while assembling a form document
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("duplicate field name in form document: {0}")]
    DuplicateFieldName(String),
}

/// Handle to a node inside one [`FormDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Row marker classes recognized when resolving the row around a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    FormRow,
    FieldBox,
}

impl RowMarker {
    /// The marker's class name in the rendered markup
    pub fn class_name(self) -> &'static str {
        match self {
            RowMarker::FormRow => "form-row",
            RowMarker::FieldBox => "fieldBox",
        }
    }
}

/// Inline display state of a node.
///
/// Visible rows carry the cleared (empty) style so they defer to the
/// surrounding layout; hidden rows carry the literal `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStyle {
    #[default]
    Default,
    None,
}

impl DisplayStyle {
    /// Inline style string this state renders as
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayStyle::Default => "",
            DisplayStyle::None => "none",
        }
    }

    pub fn is_hidden(self) -> bool {
        matches!(self, DisplayStyle::None)
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Container { marker: Option<RowMarker> },
    Input { field: FormField },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
    display: DisplayStyle,
}

/// Arena-backed form tree. Nodes are only ever appended, so a [`NodeId`]
/// stays valid for the lifetime of the document.
#[derive(Debug, Clone)]
pub struct FormDocument {
    nodes: Vec<Node>,
}

impl FormDocument {
    /// Create a document holding only the (unmarked) root container
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Container { marker: None },
                display: DisplayStyle::Default,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a container under `parent`
    pub fn add_container(&mut self, parent: NodeId, marker: Option<RowMarker>) -> NodeId {
        debug_assert!(
            matches!(self.nodes[parent.0].kind, NodeKind::Container { .. }),
            "containers nest under containers"
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            kind: NodeKind::Container { marker },
            display: DisplayStyle::Default,
        });
        id
    }

    /// Append a marked row container directly under the root
    pub fn add_row(&mut self, marker: RowMarker) -> NodeId {
        let root = self.root();
        self.add_container(root, Some(marker))
    }

    /// Append an input under `parent`. Field names must be unique within
    /// the document; a duplicate is a bug in the form definition.
    pub fn add_input(&mut self, parent: NodeId, field: FormField) -> Result<NodeId, DocumentError> {
        if self.input_by_name(&field.name).is_some() {
            return Err(DocumentError::DuplicateFieldName(field.name));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            kind: NodeKind::Input { field },
            display: DisplayStyle::Default,
        });
        Ok(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Marker class of a container node, if any
    pub fn marker(&self, id: NodeId) -> Option<RowMarker> {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Container { marker }) => *marker,
            _ => None,
        }
    }

    /// Nearest node carrying `marker`, starting at `from` itself and
    /// walking up through its ancestors.
    pub fn closest(&self, from: NodeId, marker: RowMarker) -> Option<NodeId> {
        let mut current = Some(from);
        while let Some(id) = current {
            if self.marker(id) == Some(marker) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// First input in document order whose field name matches exactly
    pub fn input_by_name(&self, name: &str) -> Option<NodeId> {
        self.input_within(self.root(), name)
    }

    /// Like [`Self::input_by_name`], restricted to the subtree under `scope`
    pub fn input_within(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.nodes.iter().enumerate().find_map(|(i, n)| {
            let NodeKind::Input { field } = &n.kind else {
                return None;
            };
            let id = NodeId(i);
            (field.name == name && self.is_descendant_of(id, scope)).then_some(id)
        })
    }

    fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    pub fn field(&self, id: NodeId) -> Option<&FormField> {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Input { field }) => Some(field),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, id: NodeId) -> Option<&mut FormField> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Input { field }) => Some(field),
            _ => None,
        }
    }

    /// Current value of the named input, or `""` when the input is absent
    pub fn value(&self, name: &str) -> &str {
        self.input_by_name(name)
            .and_then(|id| self.field(id))
            .map(|f| f.as_str())
            .unwrap_or("")
    }

    pub fn display(&self, id: NodeId) -> DisplayStyle {
        self.nodes.get(id.0).map(|n| n.display).unwrap_or_default()
    }

    pub fn set_display(&mut self, id: NodeId, display: DisplayStyle) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.display = display;
        }
    }

    /// A node renders only if neither it nor any ancestor is display-none
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.display(node).is_hidden() {
                return false;
            }
            current = self.parent(node);
        }
        true
    }

    /// All inputs in document order
    pub fn inputs(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Input { .. }))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// Inputs currently visible, in document order
    pub fn visible_inputs(&self) -> Vec<NodeId> {
        self.inputs()
            .into_iter()
            .filter(|id| self.is_visible(*id))
            .collect()
    }
}

impl Default for FormDocument {
    fn default() -> Self {
        Self::new()
    }
}
