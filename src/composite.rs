//! Composite shapes: a boolean expression tree over primitives.
//!
//! Nodes live in an append-only arena and refer to each other by [`NodeId`],
//! so growing the arena never invalidates existing references. A containment
//! query linearises the tree from its root into a prefix sequence, then walks
//! that sequence backwards with a stack of booleans.
//!
//! ```no_run
//! # use csgshape::{CompositeShape, Cuboid, Quaternion, Vector4};
//! let mut shape = CompositeShape::new();
//! shape.union(Cuboid::new(Vector4::point(0.0, 0.0, 0.0), Vector4::point(2.0, 2.0, 2.0), Quaternion::identity()));
//! shape.difference(Cuboid::new(Vector4::point(0.5, 0.5, 0.5), Vector4::point(1.0, 1.0, 1.0), Quaternion::identity()));
//!
//! assert!(shape.contains(&Vector4::point(0.25, 0.25, 0.25)).unwrap());
//! assert!(!shape.contains(&Vector4::point(1.0, 1.0, 1.0)).unwrap());
//! ```
//!
//! The structure is not internally synchronised. Queries take `&self` and may
//! run from many threads at once; builder calls need `&mut self`, which keeps
//! them exclusive.

use crate::cuboid::Cuboid;
use crate::diagnostics::Diagnostics;
use crate::errors::{CsgError, CsgResult};
use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::vector::Vector4;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Stable index of a node inside its [`CompositeShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Boolean operator joining two subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Union,
    /// Everything in the left operand that is not in the right one.
    Difference,
    Intersection,
}

impl BooleanOp {
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            BooleanOp::Union => left || right,
            BooleanOp::Difference => left && !right,
            BooleanOp::Intersection => left && right,
        }
    }
}

/// A primitive solid stored in a composite.
#[derive(Debug, Clone)]
pub enum Primitive {
    Cuboid(Cuboid),
}

impl Primitive {
    pub fn contains(&self, point: &Vector4) -> CsgResult<bool> {
        match self {
            Primitive::Cuboid(cuboid) => cuboid.contains(point),
        }
    }

    pub fn calc_volume(&self) -> Real {
        match self {
            Primitive::Cuboid(cuboid) => cuboid.calc_volume(),
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            Primitive::Cuboid(cuboid) => cuboid.bounding_box(),
        }
    }

    pub fn as_cuboid(&self) -> Option<&Cuboid> {
        match self {
            Primitive::Cuboid(cuboid) => Some(cuboid),
        }
    }

    pub fn as_cuboid_mut(&mut self) -> Option<&mut Cuboid> {
        match self {
            Primitive::Cuboid(cuboid) => Some(cuboid),
        }
    }
}

impl From<Cuboid> for Primitive {
    fn from(cuboid: Cuboid) -> Self {
        Primitive::Cuboid(cuboid)
    }
}

/// One node of the boolean tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeNode {
    /// Leaf: index into the shape list.
    Shape { shape: usize },
    Operation {
        op: BooleanOp,
        left: NodeId,
        right: NodeId,
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Instruction<'a> {
    Leaf(&'a Primitive),
    Operation(BooleanOp),
}

/// A composite tree linearised for evaluation.
///
/// Operators come before their operands, so evaluation runs from the back.
/// Flattening once and evaluating many points skips repeated traversals.
#[derive(Debug, Clone)]
pub struct Flattened<'a> {
    instructions: Vec<Instruction<'a>>,
}

impl Flattened<'_> {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// An empty program contains nothing.
    pub fn evaluate(&self, point: &Vector4) -> CsgResult<bool> {
        if self.instructions.is_empty() {
            return Ok(false);
        }
        evaluate_rpn(&self.instructions, point)
    }
}

pub(crate) fn evaluate_rpn(instructions: &[Instruction<'_>], point: &Vector4) -> CsgResult<bool> {
    let mut operands: Vec<bool> = Vec::with_capacity(instructions.len());

    for (position, instruction) in instructions.iter().enumerate().rev() {
        match instruction {
            Instruction::Leaf(primitive) => operands.push(primitive.contains(point)?),
            Instruction::Operation(op) => {
                // Left subtrees are evaluated first, so the right operand is on top.
                let (Some(right), Some(left)) = (operands.pop(), operands.pop()) else {
                    return Err(CsgError::StackUnderflow { position });
                };
                operands.push(op.apply(left, right));
            }
        }
    }

    match operands.as_slice() {
        [result] => Ok(*result),
        _ => Err(CsgError::UnbalancedStack {
            remaining: operands.len(),
        }),
    }
}

/// A solid built from primitives combined with boolean operators.
#[derive(Debug, Clone, Default)]
pub struct CompositeShape {
    shapes: Vec<Primitive>,
    nodes: Vec<CompositeNode>,
    root: Option<NodeId>,
}

impl CompositeShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a shape from raw parts without checking any reference.
    ///
    /// Broken references are reported by [`CompositeShape::validate`] and by
    /// every query.
    pub fn from_parts(shapes: Vec<Primitive>, nodes: Vec<CompositeNode>, root: Option<NodeId>) -> Self {
        CompositeShape { shapes, nodes, root }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn nodes(&self) -> &[CompositeNode] {
        &self.nodes
    }

    pub fn shapes(&self) -> &[Primitive] {
        &self.shapes
    }

    /// Mutable access to a stored primitive, for in-place position and dimension edits.
    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Primitive> {
        self.shapes.get_mut(index)
    }

    pub fn node(&self, id: NodeId) -> CsgResult<&CompositeNode> {
        self.nodes.get(id.0).ok_or(CsgError::NodeOutOfRange {
            node: id.0,
            len: self.nodes.len(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Append a primitive and a leaf for it.
    ///
    /// The leaf becomes the root only when the tree is still empty; otherwise
    /// it stays detached until referenced through [`CompositeShape::combine`].
    pub fn add_shape(&mut self, shape: impl Into<Primitive>) -> NodeId {
        self.shapes.push(shape.into());
        let id = NodeId(self.nodes.len());
        self.nodes.push(CompositeNode::Shape {
            shape: self.shapes.len() - 1,
        });

        if self.root.is_none() {
            self.root = Some(id);
        }

        log::debug!("added shape {} as node {}", self.shapes.len() - 1, id.0);
        id
    }

    /// Add a primitive and union it with the current tree.
    pub fn union(&mut self, shape: impl Into<Primitive>) -> NodeId {
        self.append_with(BooleanOp::Union, shape.into())
    }

    /// Add a primitive and carve it out of the current tree.
    pub fn difference(&mut self, shape: impl Into<Primitive>) -> NodeId {
        self.append_with(BooleanOp::Difference, shape.into())
    }

    /// Add a primitive and intersect it with the current tree.
    pub fn intersection(&mut self, shape: impl Into<Primitive>) -> NodeId {
        self.append_with(BooleanOp::Intersection, shape.into())
    }

    fn append_with(&mut self, op: BooleanOp, shape: Primitive) -> NodeId {
        let previous = self.root;
        let leaf = self.add_shape(shape);

        match previous {
            Some(root) => self.push_operation(op, root, leaf),
            None => leaf,
        }
    }

    /// Join two existing nodes under `op`. The new node becomes the root.
    ///
    /// Both operands must be distinct and must not already be an operand of
    /// another operator: every node has at most one parent.
    pub fn combine(&mut self, op: BooleanOp, left: NodeId, right: NodeId) -> CsgResult<NodeId> {
        self.node(left)?;
        self.node(right)?;
        if left == right {
            return Err(CsgError::SharedNode { node: right.0 });
        }
        for operand in [left, right] {
            if self.has_parent(operand) {
                return Err(CsgError::SharedNode { node: operand.0 });
            }
        }
        Ok(self.push_operation(op, left, right))
    }

    fn has_parent(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|node| {
            matches!(*node, CompositeNode::Operation { left, right, .. } if left == id || right == id)
        })
    }

    fn push_operation(&mut self, op: BooleanOp, left: NodeId, right: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(CompositeNode::Operation { op, left, right });
        self.root = Some(id);

        log::debug!("node {}: {op:?}({}, {}) is the new root", id.0, left.0, right.0);
        id
    }

    pub fn set_root(&mut self, id: NodeId) -> CsgResult<()> {
        self.node(id)?;
        self.root = Some(id);
        Ok(())
    }

    /// Check every reference in the arena and that the tree under the root is acyclic.
    pub fn validate(&self) -> CsgResult<()> {
        for node in &self.nodes {
            match *node {
                CompositeNode::Shape { shape } => {
                    if shape >= self.shapes.len() {
                        return Err(CsgError::ShapeOutOfRange {
                            shape,
                            len: self.shapes.len(),
                        });
                    }
                }
                CompositeNode::Operation { left, right, .. } => {
                    self.node(left)?;
                    self.node(right)?;
                }
            }
        }
        if let Some(root) = self.root {
            self.node(root)?;
        }
        self.flatten().map(|_| ())
    }

    /// Linearise the tree under the root.
    ///
    /// Each visited node is recorded, then an operator pushes its left child
    /// and its right child, so the right subtree is recorded first. Every
    /// operator ends up ahead of both operands.
    ///
    /// Each node is visited at most once, so the sequence never grows past
    /// the arena. A node met again while still on the current path is a
    /// cycle; met again anywhere else it is a shared subtree.
    pub fn flatten(&self) -> CsgResult<Flattened<'_>> {
        enum Visit {
            Enter(NodeId),
            Leave(NodeId),
        }

        let mut instructions = Vec::with_capacity(self.nodes.len());

        let Some(root) = self.root else {
            return Ok(Flattened { instructions });
        };

        let mut visited = vec![false; self.nodes.len()];
        let mut on_path = vec![false; self.nodes.len()];
        let mut pending = vec![Visit::Enter(root)];

        while let Some(visit) = pending.pop() {
            let id = match visit {
                Visit::Leave(id) => {
                    on_path[id.0] = false;
                    continue;
                }
                Visit::Enter(id) => id,
            };

            let node = *self.node(id)?;
            if on_path[id.0] {
                return Err(CsgError::CyclicTree { node: id.0 });
            }
            if visited[id.0] {
                return Err(CsgError::SharedNode { node: id.0 });
            }
            visited[id.0] = true;

            match node {
                CompositeNode::Shape { shape } => {
                    let primitive = self.shapes.get(shape).ok_or(CsgError::ShapeOutOfRange {
                        shape,
                        len: self.shapes.len(),
                    })?;
                    instructions.push(Instruction::Leaf(primitive));
                }
                CompositeNode::Operation { op, left, right } => {
                    instructions.push(Instruction::Operation(op));
                    on_path[id.0] = true;
                    pending.push(Visit::Leave(id));
                    pending.push(Visit::Enter(left));
                    pending.push(Visit::Enter(right));
                }
            }
        }

        log::trace!("flattened {} nodes into {} instructions", self.nodes.len(), instructions.len());
        Ok(Flattened { instructions })
    }

    /// Whether `point` (read as a 3D point, `w = 1`) is inside the solid.
    ///
    /// An empty shape contains nothing. A malformed tree is an error.
    pub fn contains(&self, point: &Vector4) -> CsgResult<bool> {
        self.flatten()?.evaluate(point)
    }

    /// Like [`CompositeShape::contains`] but fails closed: any error is sent to
    /// `diagnostics` and the point is treated as outside.
    pub fn contains_reported(&self, point: &Vector4, diagnostics: &Diagnostics) -> bool {
        match self.contains(point) {
            Ok(inside) => inside,
            Err(error) => {
                diagnostics.report(&error);
                false
            }
        }
    }

    /// Evaluate many points against a single flattening of the tree.
    #[cfg(not(feature = "parallel"))]
    pub fn contains_many(&self, points: &[Vector4]) -> CsgResult<Vec<bool>> {
        let program = self.flatten()?;
        points.iter().map(|point| program.evaluate(point)).collect()
    }

    /// Evaluate many points in parallel against a single flattening of the tree.
    #[cfg(feature = "parallel")]
    pub fn contains_many(&self, points: &[Vector4]) -> CsgResult<Vec<bool>> {
        let program = self.flatten()?;
        points.par_iter().map(|point| program.evaluate(point)).collect()
    }

    /// Enclosed volume. Not computed: this needs numerical integration over the
    /// boolean volume, so the answer is always `None`.
    pub fn calc_volume(&self) -> Option<Real> {
        None
    }

    /// Merged bounds of every stored primitive, whether or not it is reachable
    /// from the root. Conservative for differences and intersections.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.shapes
            .iter()
            .map(Primitive::bounding_box)
            .reduce(|acc, aabb| acc.merged(&aabb))
    }
}
