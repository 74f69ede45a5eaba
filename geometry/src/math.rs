//! Vector types
//!
//! Geometry is expressed with glam's `Vec2`/`Vec3`. [`VectorKey`] adds the
//! total order and hashing that floats lack, so positions can key ordered or
//! hashed maps.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

pub use glam::{Mat4, UVec3, Vec2, Vec3};

/// A `Vec3` usable as a map key
///
/// Ordered lexicographically by x, then y, then z using IEEE total ordering.
/// Equality is bitwise, except that negative zero is stored as positive zero so
/// `-0.0` and `0.0` produce the same key.
#[derive(Debug, Clone, Copy)]
pub struct VectorKey(Vec3);

impl VectorKey {
    pub fn new(v: Vec3) -> Self {
        // Adding +0.0 turns -0.0 into +0.0 and leaves every other value alone
        Self(v + Vec3::ZERO)
    }

    pub fn vector(self) -> Vec3 {
        self.0
    }

    fn bits(&self) -> [u32; 3] {
        [self.0.x.to_bits(), self.0.y.to_bits(), self.0.z.to_bits()]
    }
}

impl From<Vec3> for VectorKey {
    fn from(v: Vec3) -> Self {
        Self::new(v)
    }
}

impl PartialEq for VectorKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for VectorKey {}

impl PartialOrd for VectorKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VectorKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .x
            .total_cmp(&other.0.x)
            .then_with(|| self.0.y.total_cmp(&other.0.y))
            .then_with(|| self.0.z.total_cmp(&other.0.z))
    }
}

impl Hash for VectorKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_key_orders_lexicographically() {
        let a = VectorKey::new(Vec3::new(0.0, 5.0, 5.0));
        let b = VectorKey::new(Vec3::new(1.0, 0.0, 0.0));
        let c = VectorKey::new(Vec3::new(1.0, 0.0, 2.0));

        assert!(a < b);
        assert!(b < c);
        assert_eq!(b.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_key_negative_zero_matches_zero() {
        let a = VectorKey::new(Vec3::new(-0.0, 1.0, -0.0));
        let b = VectorKey::new(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_key_deduplicates_in_map() {
        let mut map = BTreeMap::new();
        let mid = Vec3::new(1.0, 2.0, 3.0).lerp(Vec3::new(3.0, 2.0, 1.0), 0.5);

        map.insert(VectorKey::new(mid), 0u32);
        map.insert(VectorKey::new(Vec3::new(2.0, 2.0, 2.0)), 1u32);

        assert_eq!(map.len(), 1);
        assert_eq!(map[&VectorKey::new(Vec3::splat(2.0))], 1);
    }
}
