use crate::models::body::Body;
use std::collections::HashMap;

/// Table of live bodies keyed by label. Iteration follows insertion (scene) order.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    index: HashMap<String, usize>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize { self.bodies.len() }
    pub fn is_empty(&self) -> bool { self.bodies.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn labels(&self) -> Vec<&str> {
        self.bodies.iter().map(|b| b.label()).collect()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn get(&self, label: &str) -> Option<&Body> {
        self.index_of(label).map(|i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, label: &str) -> Option<&mut Body> {
        self.index_of(label).map(move |i| &mut self.bodies[i])
    }

    pub fn at(&self, i: usize) -> Option<&Body> {
        self.bodies.get(i)
    }

    pub(crate) fn at_mut(&mut self, i: usize) -> Option<&mut Body> {
        self.bodies.get_mut(i)
    }

    /// Insert a body, replacing any live entry with the same label in place.
    /// Returns true when an entry was replaced.
    pub fn insert(&mut self, body: Body) -> bool {
        match self.index.get(body.label()) {
            Some(&i) => {
                self.bodies[i] = body;
                true
            }
            None => {
                self.index.insert(body.label().to_string(), self.bodies.len());
                self.bodies.push(body);
                false
            }
        }
    }

    pub fn remove(&mut self, label: &str) -> Option<Body> {
        let i = self.index.remove(label)?;
        let body = self.bodies.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(body)
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.index.clear();
    }

    /// Mutable access to two distinct entries at once (contact resolution touches both).
    pub(crate) fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
        if i == j || i >= self.bodies.len() || j >= self.bodies.len() {
            return None;
        }
        if i < j {
            let (lo, hi) = self.bodies.split_at_mut(j);
            Some((&mut lo[i], &mut hi[0]))
        } else {
            let (lo, hi) = self.bodies.split_at_mut(i);
            Some((&mut hi[0], &mut lo[j]))
        }
    }
}
