//! Ownership of composite shapes behind integer handles.

use crate::composite::CompositeShape;
use crate::diagnostics::Diagnostics;
use crate::errors::{CsgError, CsgResult};
use crate::vector::Vector4;
use hashbrown::HashMap;
use std::fmt;

/// Handle to a shape stored in a [`ShapeRegistry`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u32);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Explicitly owned set of composite shapes.
///
/// Lookups and queries take `&self`; wrap the registry in a lock if it is
/// shared between threads and mutated.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: HashMap<ShapeId, CompositeShape>,
    next_id: u32,
    diagnostics: Diagnostics,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostics(diagnostics: Diagnostics) -> Self {
        ShapeRegistry {
            diagnostics,
            ..Self::default()
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }

    pub fn insert(&mut self, shape: CompositeShape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        log::debug!("registered composite shape {id}");
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<&CompositeShape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut CompositeShape> {
        self.shapes.get_mut(&id)
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<CompositeShape> {
        let removed = self.shapes.remove(&id);
        if removed.is_some() {
            log::debug!("removed composite shape {id}");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<ShapeId> {
        let mut ids: Vec<ShapeId> = self.shapes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn try_contains(&self, id: ShapeId, point: &Vector4) -> CsgResult<bool> {
        self.shapes
            .get(&id)
            .ok_or(CsgError::UnknownShape { id: id.0 })?
            .contains(point)
    }

    /// Containment by handle. Unknown ids and evaluation failures are reported
    /// through the registry's diagnostics and answer `false`.
    pub fn contains(&self, id: ShapeId, point: &Vector4) -> bool {
        match self.try_contains(id, point) {
            Ok(inside) => inside,
            Err(error) => {
                self.diagnostics.report(&error);
                false
            }
        }
    }
}
