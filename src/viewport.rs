use egui::{Color32, Pos2, Rect, Sense, Stroke};
use glam::{Mat4, Vec2, Vec3};

use crate::camera::{OrbitCamera, NEAR_PLANE};
use crate::geometry::{Shape, ShapeLibrary};
use crate::math::{intersect_aabb, moller_trumbore_intersect, Ray, Rgb, AABB};
use crate::selection::Selection;
use crate::store::ObjectStore;
use crate::types::{PrimitiveKind, PrimitiveRecord};

pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
pub const AMBIENT_INTENSITY: f32 = 0.55;
pub const DIFFUSE_INTENSITY: f32 = 0.45;
pub const OUTLINE_COLOR: Color32 = Color32::BLACK;
pub const OUTLINE_WIDTH: f32 = 1.0;

/// Colors the viewport paints with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportStyle {
    pub highlight: Rgb,
    pub background: Rgb,
}

impl Default for ViewportStyle {
    fn default() -> Self {
        Self {
            highlight: Rgb::RED,
            background: Rgb::WHITE,
        }
    }
}

/// Fill for record `index`: the highlight when selected, else its own color
pub fn fill_color(
    index: usize,
    record: &PrimitiveRecord,
    selection: Selection,
    len: usize,
    highlight: Rgb,
) -> Rgb {
    if selection.is_highlighted(index, len) {
        highlight
    } else {
        record.color
    }
}

/// One record's unit shape transformed into world space
#[derive(Debug, Clone)]
pub struct WorldMesh {
    pub index: usize,
    pub kind: PrimitiveKind,
    pub vertices: Vec<Vec3>,
    pub center: Vec3,
    pub bounds: AABB,
}

impl WorldMesh {
    pub fn new(index: usize, record: &PrimitiveRecord, shape: &Shape) -> Self {
        Self {
            index,
            kind: record.kind,
            vertices: shape.vertices.iter().map(|&v| record.transform_point(v)).collect(),
            center: record.position,
            bounds: record.bounds(),
        }
    }

    /// Distance along `ray` to the nearest triangle, if any
    pub fn intersect(&self, ray: &Ray, shape: &Shape) -> Option<f32> {
        let t_box = intersect_aabb(ray.origin, ray.direction, self.bounds.min, self.bounds.max);
        if t_box < 0.0 {
            return None;
        }

        shape
            .triangles()
            .filter_map(|(_, [a, b, c])| {
                moller_trumbore_intersect(
                    ray.origin,
                    ray.direction,
                    self.vertices[a],
                    self.vertices[b],
                    self.vertices[c],
                )
            })
            .map(|hit| hit.t)
            .min_by(f32::total_cmp)
    }
}

/// World-space meshes for the whole store, rebuilt when its revision moves
#[derive(Debug, Default)]
pub struct SceneGeometry {
    revision: Option<u64>,
    meshes: Vec<WorldMesh>,
}

impl SceneGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the cache was rebuilt
    pub fn sync(&mut self, store: &ObjectStore, shapes: &ShapeLibrary) -> bool {
        if self.revision == Some(store.revision()) {
            return false;
        }

        // Non-finite records have no drawable or pickable geometry
        self.meshes = store
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_finite())
            .map(|(index, record)| WorldMesh::new(index, record, shapes.get(record.kind)))
            .collect();
        self.revision = Some(store.revision());
        true
    }

    pub fn meshes(&self) -> &[WorldMesh] {
        &self.meshes
    }

    /// Index of the nearest record hit by `ray`
    pub fn pick(&self, ray: &Ray, shapes: &ShapeLibrary) -> Option<usize> {
        self.pick_where(ray, shapes, |_| true)
    }

    /// Like [`SceneGeometry::pick`], limited to meshes accepted by `visible`
    pub fn pick_where(
        &self,
        ray: &Ray,
        shapes: &ShapeLibrary,
        visible: impl Fn(&WorldMesh) -> bool,
    ) -> Option<usize> {
        self.meshes
            .iter()
            .filter(|mesh| visible(mesh))
            .filter_map(|mesh| mesh.intersect(ray, shapes.get(mesh.kind)).map(|t| (t, mesh.index)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, index)| index)
    }
}

/// Maps world points into a screen rectangle
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    view_projection: Mat4,
    rect: Rect,
}

impl Projector {
    pub fn new(camera: &OrbitCamera, rect: Rect) -> Self {
        Self {
            view_projection: camera.view_projection(aspect(rect)),
            rect,
        }
    }

    /// Screen position of `point`, or `None` when it lies behind the near plane
    pub fn project(&self, point: Vec3) -> Option<Pos2> {
        let clip = self.view_projection * point.extend(1.0);
        if !Self::in_front(clip.w) {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Pos2::new(
            self.rect.left() + (ndc.x + 1.0) * 0.5 * self.rect.width(),
            self.rect.top() + (1.0 - ndc.y) * 0.5 * self.rect.height(),
        ))
    }
}

impl Projector {
    fn in_front(w: f32) -> bool {
        w > NEAR_PLANE
    }

    /// True when every point projects; records failing this are not drawn
    pub fn sees_all(&self, points: &[Vec3]) -> bool {
        points
            .iter()
            .all(|&p| Self::in_front((self.view_projection * p.extend(1.0)).w))
    }
}

fn aspect(rect: Rect) -> f32 {
    if rect.height() > 0.0 {
        rect.width() / rect.height()
    } else {
        1.0
    }
}

/// Normalized device coordinates of a screen point inside `rect`
pub fn screen_to_ndc(point: Pos2, rect: Rect) -> Vec2 {
    Vec2::new(
        (point.x - rect.left()) / rect.width() * 2.0 - 1.0,
        1.0 - (point.y - rect.top()) / rect.height() * 2.0,
    )
}

/// Projected, shaded faces and visible outline edges of one record
#[derive(Debug, Clone)]
pub struct ObjectDraw {
    pub index: usize,
    pub depth: f32,
    pub fill: Rgb,
    pub faces: Vec<(Vec<Pos2>, Color32)>,
    pub edges: Vec<[Pos2; 2]>,
}

fn lambert(normal: Vec3, point: Vec3) -> f32 {
    normal.dot((POINT_LIGHT_POSITION - point).normalize_or_zero()).max(0.0)
}

/// Build the draw list, farthest record first
pub fn build_draw_list(
    geometry: &SceneGeometry,
    shapes: &ShapeLibrary,
    store: &ObjectStore,
    selection: Selection,
    camera: &OrbitCamera,
    rect: Rect,
    style: &ViewportStyle,
) -> Vec<ObjectDraw> {
    let projector = Projector::new(camera, rect);
    let eye = camera.position();

    let mut draws: Vec<ObjectDraw> = geometry
        .meshes()
        .iter()
        .filter_map(|mesh| {
            let record = store.get(mesh.index)?;
            let shape = shapes.get(mesh.kind);
            let screen: Vec<Pos2> = mesh
                .vertices
                .iter()
                .map(|&v| projector.project(v))
                .collect::<Option<Vec<Pos2>>>()?;

            let fill = fill_color(mesh.index, record, selection, store.len(), style.highlight);

            let mut front = vec![false; shape.faces.len()];
            let mut faces = Vec::new();
            for (face_index, face) in shape.faces.iter().enumerate() {
                let points: Vec<Vec3> = face.iter().map(|&i| mesh.vertices[i]).collect();
                let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
                let mut normal = (points[1] - points[0])
                    .cross(points[2] - points[0])
                    .normalize_or_zero();
                // Negative scales flip the winding
                if normal.dot(centroid - mesh.center) < 0.0 {
                    normal = -normal;
                }
                if normal.dot(eye - centroid) <= 0.0 {
                    continue;
                }
                front[face_index] = true;

                let shade = AMBIENT_INTENSITY + DIFFUSE_INTENSITY * lambert(normal, centroid);
                let color = fill.scaled(shade).to_color32();
                faces.push((face.iter().map(|&i| screen[i]).collect(), color));
            }

            let edges = shape
                .edges
                .iter()
                .filter(|edge| front[edge.faces[0]] || front[edge.faces[1]])
                .map(|edge| [screen[edge.a], screen[edge.b]])
                .collect();

            Some(ObjectDraw {
                index: mesh.index,
                depth: eye.distance(mesh.center),
                fill,
                faces,
                edges,
            })
        })
        .collect();

    draws.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    draws
}

/// Paint a draw list: per record, filled faces first, then its outline
pub fn paint(painter: &egui::Painter, draws: &[ObjectDraw]) {
    let stroke = Stroke::new(OUTLINE_WIDTH, OUTLINE_COLOR);
    for draw in draws {
        let mut mesh = egui::Mesh::default();
        for (points, color) in &draw.faces {
            let base = mesh.vertices.len() as u32;
            for &p in points {
                mesh.colored_vertex(p, *color);
            }
            for i in 1..points.len().saturating_sub(1) as u32 {
                mesh.add_triangle(base, base + i, base + i + 1);
            }
        }
        painter.add(egui::Shape::mesh(mesh));

        for edge in &draw.edges {
            painter.line_segment(*edge, stroke);
        }
    }
}

/// Interactive 3D view of the store
pub struct Viewport {
    pub camera: OrbitCamera,
    pub style: ViewportStyle,
    shapes: ShapeLibrary,
    geometry: SceneGeometry,
}

impl Viewport {
    pub fn new(camera: OrbitCamera, style: ViewportStyle) -> Self {
        Self {
            camera,
            style,
            shapes: ShapeLibrary::new(),
            geometry: SceneGeometry::new(),
        }
    }

    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    pub fn sync(&mut self, store: &ObjectStore) {
        if self.geometry.sync(store, &self.shapes) {
            log::trace!("viewport: rebuilt geometry at revision {}", store.revision());
        }
    }

    /// Index of the record under a screen point inside `rect`
    pub fn pick(&self, point: Pos2, rect: Rect) -> Option<usize> {
        let ray = self.camera.ray_through(screen_to_ndc(point, rect), aspect(rect));
        // Only records that are actually drawn can be clicked
        let projector = Projector::new(&self.camera, rect);
        self.geometry
            .pick_where(&ray, &self.shapes, |mesh| projector.sees_all(&mesh.vertices))
    }

    pub fn draw_list(&self, store: &ObjectStore, selection: Selection, rect: Rect) -> Vec<ObjectDraw> {
        build_draw_list(&self.geometry, &self.shapes, store, selection, &self.camera, rect, &self.style)
    }

    /// Draw the viewport and handle camera input; returns a clicked record index
    pub fn show(&mut self, ui: &mut egui::Ui, store: &ObjectStore, selection: Selection) -> Option<usize> {
        self.sync(store);

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        if response.dragged_by(egui::PointerButton::Primary) {
            let d = response.drag_delta();
            self.camera.orbit(Vec2::new(d.x, d.y));
        } else if response.dragged_by(egui::PointerButton::Secondary) {
            let d = response.drag_delta();
            self.camera.pan(Vec2::new(d.x, d.y), rect.height());
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }
        }

        let clicked = if response.clicked() {
            response.interact_pointer_pos().and_then(|pos| self.pick(pos, rect))
        } else {
            None
        };

        painter.rect_filled(rect, 0.0, self.style.background.to_color32());
        let draws = self.draw_list(store, selection, rect);
        paint(&painter, &draws);

        clicked
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(OrbitCamera::default(), ViewportStyle::default())
    }
}
