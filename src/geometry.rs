use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::types::PrimitiveKind;

/// Number of radial segments of the pyramid cone
pub const PYRAMID_SEGMENTS: usize = 4;

/// Feature edge with the faces that meet along it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub faces: [usize; 2],
}

/// Unit shape as convex polygonal faces over a shared vertex list
///
/// Faces are wound counter-clockwise seen from outside. Edges are derived
/// from the faces, so every edge borders exactly two faces.
#[derive(Debug, Clone)]
pub struct Shape {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<usize>>,
    pub edges: Vec<Edge>,
}

impl Shape {
    fn from_faces(vertices: Vec<Vec3>, faces: Vec<Vec<usize>>) -> Self {
        let mut adjacency: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
        for (face_index, face) in faces.iter().enumerate() {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                adjacency.entry((a.min(b), a.max(b))).or_default().push(face_index);
            }
        }

        let edges = adjacency
            .into_iter()
            .filter_map(|((a, b), faces)| match faces.as_slice() {
                [f0, f1] => Some(Edge { a, b, faces: [*f0, *f1] }),
                _ => None,
            })
            .collect();

        Self { vertices, faces, edges }
    }

    /// Fan triangulation of every face, tagged with the face it came from
    pub fn triangles(&self) -> impl Iterator<Item = (usize, [usize; 3])> + '_ {
        self.faces.iter().enumerate().flat_map(|(face_index, face)| {
            (1..face.len().saturating_sub(1))
                .map(move |i| (face_index, [face[0], face[i], face[i + 1]]))
        })
    }
}

/// Unit cube centred on the origin
pub fn unit_box() -> Shape {
    let vertices = vec![
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, 0.5),
    ];
    let faces = vec![
        vec![4, 5, 6, 7], // +z
        vec![1, 0, 3, 2], // -z
        vec![5, 1, 2, 6], // +x
        vec![0, 4, 7, 3], // -x
        vec![7, 6, 2, 3], // +y
        vec![0, 1, 5, 4], // -y
    ];
    Shape::from_faces(vertices, faces)
}

/// Cone of radius 1 and height 1 with four radial segments
///
/// Apex at `y = 0.5`; base ring at `y = -0.5` with corners at angles
/// `k * PI / 2` measured from +z toward +x.
pub fn unit_pyramid() -> Shape {
    let mut vertices = vec![Vec3::new(0.0, 0.5, 0.0)];
    vertices.extend((0..PYRAMID_SEGMENTS).map(|k| {
        let theta = k as f32 * FRAC_PI_2;
        Vec3::new(theta.sin(), -0.5, theta.cos())
    }));

    let ring = |k: usize| 1 + k % PYRAMID_SEGMENTS;
    let mut faces: Vec<Vec<usize>> = (0..PYRAMID_SEGMENTS)
        .map(|k| vec![0, ring(k), ring(k + 1)])
        .collect();
    // Base seen from below runs against the ring order
    faces.push((0..PYRAMID_SEGMENTS).rev().map(ring).collect());

    Shape::from_faces(vertices, faces)
}

/// Shape library, built once per viewport
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    box_shape: Shape,
    pyramid: Shape,
}

impl ShapeLibrary {
    pub fn new() -> Self {
        Self {
            box_shape: unit_box(),
            pyramid: unit_pyramid(),
        }
    }

    pub fn get(&self, kind: PrimitiveKind) -> &Shape {
        match kind {
            PrimitiveKind::Box => &self.box_shape,
            PrimitiveKind::Pyramid => &self.pyramid,
        }
    }
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(shape: &Shape, face: &[usize]) -> Vec3 {
        let a = shape.vertices[face[0]];
        let b = shape.vertices[face[1]];
        let c = shape.vertices[face[2]];
        (b - a).cross(c - a)
    }

    fn assert_outward(shape: &Shape) {
        for face in &shape.faces {
            let centroid = face.iter().map(|&i| shape.vertices[i]).sum::<Vec3>() / face.len() as f32;
            assert!(
                face_normal(shape, face).dot(centroid) > 0.0,
                "face {:?} is wound inward",
                face
            );
        }
    }

    #[test]
    fn test_box_counts() {
        let shape = unit_box();
        assert_eq!(shape.vertices.len(), 8);
        assert_eq!(shape.faces.len(), 6);
        assert_eq!(shape.edges.len(), 12);
        assert_eq!(shape.triangles().count(), 12);
    }

    #[test]
    fn test_pyramid_counts() {
        let shape = unit_pyramid();
        assert_eq!(shape.vertices.len(), 5);
        assert_eq!(shape.faces.len(), 5);
        assert_eq!(shape.edges.len(), 8);
        assert_eq!(shape.triangles().count(), 6);
    }

    #[test]
    fn test_faces_wound_outward() {
        assert_outward(&unit_box());
        assert_outward(&unit_pyramid());
    }

    #[test]
    fn test_pyramid_corners_on_axes() {
        let shape = unit_pyramid();
        assert_eq!(shape.vertices[0], Vec3::new(0.0, 0.5, 0.0));
        let first = shape.vertices[1];
        assert!((first - Vec3::new(0.0, -0.5, 1.0)).length() < 1e-6);
        let second = shape.vertices[2];
        assert!((second - Vec3::new(1.0, -0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_box_fits_unit_cube() {
        for v in unit_box().vertices {
            assert!(v.abs().max_element() <= 0.5);
        }
    }

    #[test]
    fn test_library_lookup() {
        let lib = ShapeLibrary::new();
        assert_eq!(lib.get(PrimitiveKind::Box).vertices.len(), 8);
        assert_eq!(lib.get(PrimitiveKind::Pyramid).vertices.len(), 5);
    }
}
