//! Static collision world of a hole: triangle mesh with per-triangle terrain
//! classification, bucketed into a uniform XZ grid for ray queries.

use bevy::prelude::*;
use thiserror::Error;

use crate::types::{TerrainId, TerrainQuery, TerrainQueryResult};

/// Default edge length of a grid cell (m).
pub const DEFAULT_CELL_SIZE: f32 = 4.0;

/// Upper bound on the number of grid cells. Larger courses get bigger cells.
const MAX_CELLS: usize = 1 << 18;

const INTERSECT_EPSILON: f32 = 1.0e-7;

/// Errors raised while building a [`TerrainWorld`] from mesh data.
#[derive(Debug, Error, PartialEq)]
pub enum TerrainMeshError {
    #[error("terrain mesh has no triangles")]
    Empty,
    #[error("triangle {triangle} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("vertex {index} is not finite")]
    NonFiniteVertex { index: usize },
}

/// One classified triangle of the course mesh.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct TerrainTriangle {
    pub indices: [u32; 3],
    pub terrain: TerrainId,
    pub trigger: u8,
}

/// Pre-parsed course geometry.
///
/// The course loader decodes the terrain of each triangle from the vertex
/// colour channels (see [`TerrainId::from_colour_channel`]); this type only
/// carries the result.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_golf_ball::terrain::TerrainMesh;
/// use bevy_golf_ball::types::TerrainId;
///
/// let mut mesh = TerrainMesh::default();
/// mesh.push_plane(Vec3::ZERO, 50.0, TerrainId::Fairway);
/// assert_eq!(mesh.triangles.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct TerrainMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<TerrainTriangle>,
}

impl TerrainMesh {
    /// Adds a quad from four corners in winding order.
    ///
    /// # Arguments
    /// * `corners` - Quad corners, consecutive around the edge
    /// * `terrain` - Terrain of both triangles
    /// * `trigger` - Trigger id of both triangles (0 = none)
    pub fn push_quad(&mut self, corners: [Vec3; 4], terrain: TerrainId, trigger: u8) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.triangles.push(TerrainTriangle {
            indices: [base, base + 1, base + 2],
            terrain,
            trigger,
        });
        self.triangles.push(TerrainTriangle {
            indices: [base, base + 2, base + 3],
            terrain,
            trigger,
        });
    }

    /// Adds an axis-aligned horizontal square.
    pub fn push_plane(&mut self, centre: Vec3, half_extent: f32, terrain: TerrainId) {
        self.push_rect(
            centre.xz() - Vec2::splat(half_extent),
            centre.xz() + Vec2::splat(half_extent),
            centre.y,
            terrain,
        );
    }

    /// Adds an axis-aligned horizontal rectangle between `min` and `max` on
    /// the XZ plane.
    pub fn push_rect(&mut self, min: Vec2, max: Vec2, height: f32, terrain: TerrainId) {
        self.push_quad(
            [
                Vec3::new(min.x, height, min.y),
                Vec3::new(max.x, height, min.y),
                Vec3::new(max.x, height, max.y),
                Vec3::new(min.x, height, max.y),
            ],
            terrain,
            0,
        );
    }

    /// Adds a square green around `pin` with a square `Hole` patch of
    /// half-size `cup_half_extent` at the same height, the way course
    /// meshes model the cup opening.
    pub fn push_green_with_cup(&mut self, pin: Vec3, half_extent: f32, cup_half_extent: f32) {
        let c = pin.xz();
        let (h, k) = (half_extent, cup_half_extent);
        let y = pin.y;

        // Four strips around the cup
        self.push_rect(c + Vec2::new(-h, -h), c + Vec2::new(h, -k), y, TerrainId::Green);
        self.push_rect(c + Vec2::new(-h, k), c + Vec2::new(h, h), y, TerrainId::Green);
        self.push_rect(c + Vec2::new(-h, -k), c + Vec2::new(-k, k), y, TerrainId::Green);
        self.push_rect(c + Vec2::new(k, -k), c + Vec2::new(h, k), y, TerrainId::Green);
        self.push_rect(c - Vec2::splat(k), c + Vec2::splat(k), y, TerrainId::Hole);
    }
}

#[derive(Clone, Copy, Debug)]
struct PreparedTriangle {
    origin: Vec3,
    edge1: Vec3,
    edge2: Vec3,
    normal: Vec3,
    terrain: TerrainId,
    trigger: u8,
}

impl PreparedTriangle {
    /// Möller–Trumbore intersection. Returns the distance along the unit
    /// `direction` from `start`, within `max_distance`.
    fn intersect(&self, start: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let p = direction.cross(self.edge2);
        let det = self.edge1.dot(p);
        if det.abs() < INTERSECT_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = start - self.origin;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(self.edge1);
        let v = direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = self.edge2.dot(q) * inv_det;
        (0.0..=max_distance).contains(&t).then_some(t)
    }
}

/// Ray-queryable collision world for one hole.
///
/// Built once per hole and read-only afterwards. Replacing the resource on a
/// hole change drops the previous world.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_golf_ball::terrain::{TerrainMesh, TerrainWorld, DEFAULT_CELL_SIZE};
/// use bevy_golf_ball::types::{TerrainId, TerrainQuery};
///
/// let mut mesh = TerrainMesh::default();
/// mesh.push_plane(Vec3::ZERO, 20.0, TerrainId::Rough);
/// let world = TerrainWorld::new(&mesh, DEFAULT_CELL_SIZE).unwrap();
///
/// let hit = world.query_down(Vec3::new(1.0, 0.5, 1.0), 20.0).unwrap();
/// assert_eq!(hit.terrain, TerrainId::Rough);
/// assert!((hit.penetration + 0.5).abs() < 1e-5);
/// ```
#[derive(Resource, Debug)]
pub struct TerrainWorld {
    triangles: Vec<PreparedTriangle>,
    cells: Vec<Vec<u32>>,
    grid_min: Vec2,
    cell_size: f32,
    columns: usize,
    rows: usize,
}

impl TerrainWorld {
    /// Builds the collision world from mesh data.
    ///
    /// # Arguments
    /// * `mesh` - Classified course geometry
    /// * `cell_size` - Requested grid cell edge length (m)
    ///
    /// # Returns
    /// The world, or the first inconsistency found in the mesh
    pub fn new(mesh: &TerrainMesh, cell_size: f32) -> Result<Self, TerrainMeshError> {
        if let Some(index) = mesh.vertices.iter().position(|v| !v.is_finite()) {
            return Err(TerrainMeshError::NonFiniteVertex { index });
        }

        let vertex_count = mesh.vertices.len();
        let mut triangles = Vec::with_capacity(mesh.triangles.len());
        for (i, triangle) in mesh.triangles.iter().enumerate() {
            let mut corners = [Vec3::ZERO; 3];
            for (corner, &index) in corners.iter_mut().zip(triangle.indices.iter()) {
                *corner = *mesh.vertices.get(index as usize).ok_or(
                    TerrainMeshError::IndexOutOfRange {
                        triangle: i,
                        index,
                        vertex_count,
                    },
                )?;
            }

            let edge1 = corners[1] - corners[0];
            let edge2 = corners[2] - corners[0];
            let Some(normal) = edge1.cross(edge2).try_normalize() else {
                // Degenerate, can never be hit
                continue;
            };
            triangles.push(PreparedTriangle {
                origin: corners[0],
                edge1,
                edge2,
                normal,
                terrain: triangle.terrain,
                trigger: triangle.trigger,
            });
        }

        if triangles.is_empty() {
            return Err(TerrainMeshError::Empty);
        }

        let (min, max) = triangles.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), t| {
                let a = t.origin.xz();
                let b = (t.origin + t.edge1).xz();
                let c = (t.origin + t.edge2).xz();
                (min.min(a).min(b).min(c), max.max(a).max(b).max(c))
            },
        );

        let extent = (max - min).max(Vec2::splat(f32::EPSILON));
        let mut cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        let (columns, rows) = loop {
            let (columns, rows) = grid_dimensions(extent, cell_size);
            if columns.checked_mul(rows).is_some_and(|cells| cells <= MAX_CELLS) {
                break (columns, rows);
            }
            cell_size *= 2.0;
        };

        let mut world = Self {
            triangles,
            cells: vec![Vec::new(); columns * rows],
            grid_min: min,
            cell_size,
            columns,
            rows,
        };

        for (index, t) in world.triangles.iter().enumerate() {
            let a = t.origin.xz();
            let b = (t.origin + t.edge1).xz();
            let c = (t.origin + t.edge2).xz();
            let (c0, r0) = world.cell_coords(a.min(b).min(c));
            let (c1, r1) = world.cell_coords(a.max(b).max(c));
            for row in r0..=r1 {
                for column in c0..=c1 {
                    world.cells[row * columns + column].push(index as u32);
                }
            }
        }

        debug!(
            "Built terrain world: {} triangles, {}x{} cells of {:.1}m",
            world.triangles.len(),
            columns,
            rows,
            cell_size
        );

        Ok(world)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn cell_coords(&self, point: Vec2) -> (usize, usize) {
        let local = ((point - self.grid_min) / self.cell_size).floor();
        let column = (local.x.max(0.0) as usize).min(self.columns - 1);
        let row = (local.y.max(0.0) as usize).min(self.rows - 1);
        (column, row)
    }
}

fn grid_dimensions(extent: Vec2, cell_size: f32) -> (usize, usize) {
    let columns = (extent.x / cell_size).ceil().max(1.0) as usize;
    let rows = (extent.y / cell_size).ceil().max(1.0) as usize;
    (columns, rows)
}

impl TerrainQuery for TerrainWorld {
    fn query(&self, origin: Vec3, direction: Vec3, length: f32) -> Option<TerrainQueryResult> {
        let direction = direction.try_normalize()?;
        if !origin.is_finite() || !(length > 0.0) {
            return None;
        }

        let start = origin - direction * (length * 0.5);
        let end = start + direction * length;
        let (c0, r0) = self.cell_coords(start.xz().min(end.xz()));
        let (c1, r1) = self.cell_coords(start.xz().max(end.xz()));

        let mut nearest: Option<(f32, &PreparedTriangle)> = None;
        for row in r0..=r1 {
            for column in c0..=c1 {
                for &index in &self.cells[row * self.columns + column] {
                    let triangle = &self.triangles[index as usize];
                    if let Some(t) = triangle.intersect(start, direction, length) {
                        if nearest.is_none_or(|(best, _)| t < best) {
                            nearest = Some((t, triangle));
                        }
                    }
                }
            }
        }

        nearest.map(|(t, triangle)| {
            let intersection = start + direction * t;
            let normal = if triangle.normal.dot(direction) > 0.0 {
                -triangle.normal
            } else {
                triangle.normal
            };
            TerrainQueryResult {
                terrain: triangle.terrain,
                trigger: triangle.trigger,
                normal,
                intersection,
                penetration: (origin - intersection).dot(direction),
            }
        })
    }
}
