use glam::Vec3;
use crate::math::{Rgb, AABB};

/// Shape family of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Box,
    Pyramid,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 2] = [PrimitiveKind::Box, PrimitiveKind::Pyramid];

    pub const fn label(self) -> &'static str {
        match self {
            PrimitiveKind::Box => "Box",
            PrimitiveKind::Pyramid => "Pyramid",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated primitive in the object store
///
/// Records are never edited after creation. Dimensions are scale factors
/// applied to the unit shape and are not validated: zero, negative and NaN
/// values are kept as typed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveRecord {
    pub id: usize,
    pub kind: PrimitiveKind,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: Rgb,
    pub position: Vec3,
}

impl PrimitiveRecord {
    /// Per-axis scale applied to the unit shape
    pub fn scale(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Local-to-world transform: scale, then translate to `position`
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        local * self.scale() + self.position
    }

    /// World-space bounds of the scaled unit shape
    ///
    /// Both shapes fit in the box spanned by `[-1, 1] x [-0.5, 0.5] x [-1, 1]`
    /// (the pyramid base reaches radius 1), so that box is transformed and the
    /// corners re-sorted to keep negative scales valid.
    pub fn bounds(&self) -> AABB {
        let half = match self.kind {
            PrimitiveKind::Box => Vec3::splat(0.5),
            PrimitiveKind::Pyramid => Vec3::new(1.0, 0.5, 1.0),
        };
        let a = self.transform_point(-half);
        let b = self.transform_point(half);
        AABB::new(a.min(b), a.max(b))
    }

    /// True when every dimension and coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.scale().is_finite() && self.position.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: PrimitiveKind, scale: Vec3, position: Vec3) -> PrimitiveRecord {
        PrimitiveRecord {
            id: 0,
            kind,
            width: scale.x,
            height: scale.y,
            depth: scale.z,
            color: Rgb::new(0.5, 0.5, 0.5),
            position,
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(PrimitiveKind::Box.label(), "Box");
        assert_eq!(PrimitiveKind::Pyramid.to_string(), "Pyramid");
        assert_eq!(PrimitiveKind::ALL.len(), 2);
    }

    #[test]
    fn test_transform_point_scales_then_translates() {
        let r = record(PrimitiveKind::Box, Vec3::new(2.0, 1.0, 3.0), Vec3::new(1.0, 0.0, -1.0));
        let p = r.transform_point(Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(p, Vec3::new(2.0, 0.5, 0.5));
    }

    #[test]
    fn test_box_bounds() {
        let r = record(PrimitiveKind::Box, Vec3::new(2.0, 1.0, 1.0), Vec3::ZERO);
        let b = r.bounds();
        assert_eq!(b.min, Vec3::new(-1.0, -0.5, -0.5));
        assert_eq!(b.max, Vec3::new(1.0, 0.5, 0.5));
    }

    #[test]
    fn test_pyramid_bounds_cover_base_radius() {
        let r = record(PrimitiveKind::Pyramid, Vec3::ONE, Vec3::new(1.0, 1.0, 1.0));
        let b = r.bounds();
        assert_eq!(b.min, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(b.max, Vec3::new(2.0, 1.5, 2.0));
    }

    #[test]
    fn test_negative_scale_bounds_stay_ordered() {
        let r = record(PrimitiveKind::Box, Vec3::new(-2.0, 1.0, 1.0), Vec3::ZERO);
        let b = r.bounds();
        assert!(b.min.x <= b.max.x);
        assert_eq!(b.min.x, -1.0);
    }

    #[test]
    fn test_nan_dimension_is_not_finite() {
        let r = record(PrimitiveKind::Box, Vec3::new(f32::NAN, 1.0, 1.0), Vec3::ZERO);
        assert!(!r.is_finite());
        let ok = record(PrimitiveKind::Box, Vec3::ONE, Vec3::ZERO);
        assert!(ok.is_finite());
    }
}
