//! The interpreter's namespace, as seen by region handlers.
//!
//! Handlers never build or modify the namespace. They only walk parent links,
//! look at the object attached to a node and ask the interpreter to evaluate
//! well-known child objects (`_HID`, `_CID`, `_ADR`, `_SEG`, `_BBN`).

use crate::{Lookup, NameSeg, OperationRegion, PnpId, PnpIdList};
use core::fmt;

/// Object attached to a namespace node, reduced to what handlers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeObject {
    /// A `Device` object.
    Device,
    /// An `OperationRegion` object.
    OperationRegion(OperationRegion),
    /// Anything else (methods, fields, scopes with data, ...).
    Other,
}

/// Read-only view of the ACPI namespace.
///
/// `Node` is whatever handle the interpreter uses for namespace entries.
/// It must be cheap to copy; handlers store none of them beyond a call.
pub trait Namespace {
    type Node: Copy + Eq + fmt::Debug;

    /// The root node, `\`.
    fn root(&self) -> Self::Node;

    /// Parent of `node`, or `None` for the root (or a detached node).
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Four-character name of `node`, used for diagnostics.
    fn name(&self, node: Self::Node) -> NameSeg;

    /// Object attached to `node`, if any.
    fn object(&self, node: Self::Node) -> Option<NodeObject>;

    /// Evaluate the child object `name` of `node`, expecting an integer.
    fn evaluate_integer(&self, node: Self::Node, name: NameSeg) -> Lookup<u64>;

    /// Evaluate the child object `name` of `node`, expecting one identifier or
    /// a package of identifiers. Integer (EISA) identifiers are expected to be
    /// decoded with [`PnpId::from_eisa_id`].
    fn evaluate_ids(&self, node: Self::Node, name: NameSeg) -> Lookup<PnpIdList>;

    /// `_HID` of `node`.
    fn evaluate_hid(&self, node: Self::Node) -> Lookup<PnpId> {
        match self.evaluate_ids(node, NameSeg::HID) {
            Lookup::Found(ids) => ids.into_iter().next().into(),
            Lookup::NotPresent => Lookup::NotPresent,
            Lookup::Failed(error) => Lookup::Failed(error),
        }
    }

    /// `_CID` of `node`.
    fn evaluate_cid(&self, node: Self::Node) -> Lookup<PnpIdList> {
        self.evaluate_ids(node, NameSeg::CID)
    }

    /// The operation region attached to `node`, if `node` is one.
    fn operation_region(&self, node: Self::Node) -> Option<OperationRegion> {
        match self.object(node)? {
            NodeObject::OperationRegion(region) => Some(region),
            NodeObject::Device | NodeObject::Other => None,
        }
    }

    /// Whether `node` holds a `Device` object.
    fn is_device(&self, node: Self::Node) -> bool {
        matches!(self.object(node), Some(NodeObject::Device))
    }
}
