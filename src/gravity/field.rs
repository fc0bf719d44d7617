use crate::gravity::GravitySource;
use crate::math::Vector3;

/// A caller-owned identifier for a registered gravity source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u32);

/// Registry of active gravity sources, shared by every agent in a scene.
///
/// Registration and unregistration are expected at activation boundaries,
/// not mid-tick; exclusive access for mutation is enforced by `&mut`.
#[derive(Debug, Clone, Default)]
pub struct GravityField {
    sources: Vec<(SourceId, GravitySource)>,
}

impl GravityField {
    /// Creates an empty field
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    /// Registers a source under the given id.
    ///
    /// # Panics
    /// Panics if the id is already registered; that is a caller bug, not a
    /// runtime condition to recover from.
    pub fn register(&mut self, id: SourceId, source: GravitySource) {
        assert!(
            !self.sources.iter().any(|(existing, _)| *existing == id),
            "duplicate registration of gravity source {:?}",
            id
        );
        self.sources.push((id, source));
    }

    /// Removes and returns the source registered under the given id.
    ///
    /// # Panics
    /// Panics if the id is not registered.
    pub fn unregister(&mut self, id: SourceId) -> GravitySource {
        let index = self
            .sources
            .iter()
            .position(|(existing, _)| *existing == id)
            .unwrap_or_else(|| panic!("unregistration of unknown gravity source {:?}", id));
        self.sources.swap_remove(index).1
    }

    /// Returns the number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if no sources are registered
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Removes every registered source
    pub fn clear(&mut self) {
        self.sources.clear();
    }

    /// Sums all source contributions at a position
    pub fn get_gravity(&self, position: Vector3) -> Vector3 {
        let mut g = Vector3::zero();
        for (_, source) in &self.sources {
            g += source.get_gravity(position);
        }
        g
    }

    /// Sums all source contributions and derives the local up axis.
    ///
    /// When the aggregate vector is (near) zero the up axis is undefined;
    /// `fallback_up` is returned instead of normalizing a zero vector.
    /// Callers keep passing their previous up axis for continuity.
    pub fn get_gravity_and_up(&self, position: Vector3, fallback_up: Vector3) -> (Vector3, Vector3) {
        let g = self.get_gravity(position);
        if g.is_zero() {
            (g, fallback_up)
        } else {
            (g, -g.normalize())
        }
    }

    /// Derives just the local up axis at a position
    pub fn get_up_axis(&self, position: Vector3, fallback_up: Vector3) -> Vector3 {
        self.get_gravity_and_up(position, fallback_up).1
    }
}
