use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::objects::Body;

/// Stable handle to a body owned by a [`Scene`](super::Scene).
///
/// Handles are never reused, so a handle to a destroyed body simply stops
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

/// Ordered body storage with handle lookup.
///
/// Insertion order is preserved and is the order bodies are ticked in.
#[derive(Debug, Default)]
pub struct BodySet {
    bodies: Vec<(BodyId, Body)>,
    slots: HashMap<BodyId, usize>,
    next_id: u64,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.slots.insert(id, self.bodies.len());
        self.bodies.push((id, body));
        id
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots.get(&id).map(|&slot| &self.bodies[slot].1)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let slot = *self.slots.get(&id)?;
        Some(&mut self.bodies[slot].1)
    }

    /// Position of `id` in insertion order.
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    /// Handle of the body at `index`.
    pub fn id_at(&self, index: usize) -> Option<BodyId> {
        self.bodies.get(index).map(|(id, _)| *id)
    }

    /// Body at `index`. Panics when out of range.
    pub fn at(&self, index: usize) -> &Body {
        &self.bodies[index].1
    }

    /// Body at `index`. Panics when out of range.
    pub fn at_mut(&mut self, index: usize) -> &mut Body {
        &mut self.bodies[index].1
    }

    /// Mutable access to two distinct bodies at once.
    ///
    /// Panics if the handles are equal or either one does not resolve.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> (&mut Body, &mut Body) {
        if a == b {
            panic!("a force creator cannot pair {a:?} with itself");
        }
        let (Some(&idx_a), Some(&idx_b)) = (self.slots.get(&a), self.slots.get(&b)) else {
            panic!("body pair {a:?}, {b:?} is not in the scene");
        };

        // split_at_mut keeps the two borrows disjoint
        if idx_a < idx_b {
            let (head, tail) = self.bodies.split_at_mut(idx_b);
            (&mut head[idx_a].1, &mut tail[0].1)
        } else {
            let (head, tail) = self.bodies.split_at_mut(idx_a);
            (&mut tail[0].1, &mut head[idx_b].1)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Body)> {
        self.bodies.iter_mut().map(|(id, body)| (*id, body))
    }

    /// Destroys every body flagged removed and returns how many there were.
    pub(crate) fn destroy_removed(&mut self) -> usize {
        if !self.bodies.iter().any(|(_, body)| body.is_removed()) {
            return 0;
        }

        let mut destroyed = 0;
        let bodies = std::mem::take(&mut self.bodies);
        for (id, body) in bodies {
            if body.is_removed() {
                body.destroy();
                destroyed += 1;
            } else {
                self.bodies.push((id, body));
            }
        }

        self.slots = self
            .bodies
            .iter()
            .enumerate()
            .map(|(slot, (id, _))| (*id, slot))
            .collect();
        destroyed
    }
}

impl Index<BodyId> for BodySet {
    type Output = Body;

    fn index(&self, id: BodyId) -> &Body {
        match self.get(id) {
            Some(body) => body,
            None => panic!("{id:?} is not in the scene"),
        }
    }
}

impl IndexMut<BodyId> for BodySet {
    fn index_mut(&mut self, id: BodyId) -> &mut Body {
        match self.get_mut(id) {
            Some(body) => body,
            None => panic!("{id:?} is not in the scene"),
        }
    }
}
