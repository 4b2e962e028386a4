use glam::{DVec2, DVec3};
use indexmap::IndexMap;

use crate::geom::Plane;

/// Texture name some editors write for faces with no texture assigned;
/// normalized to the empty string during parsing.
pub const NO_TEXTURE_NAME: &str = "__TB_empty";

/// The dialect of a map source, determined once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Not yet detected.
    #[default]
    Unknown,
    /// Classic Quake: five bare numeric texture fields per face.
    Standard,
    /// Valve 220: bracketed texture axis/offset groups per face.
    Valve,
    /// Hexen 2: one trailing numeric field of unknown meaning per face.
    Hexen2,
    /// Quake 2: trailing surface contents, flags, and value per face.
    Quake2,
}

/// Offset, rotation, and scale shared by both projection variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionBase {
    pub offset: DVec2,
    pub rotation: f64,
    pub scale: DVec2,
}

/// How a face's plane maps onto its texture image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Axes derived from the face normal (Standard, Hexen 2, Quake 2).
    Paraxial(ProjectionBase),
    /// Explicit axis vectors stored in the source (Valve 220).
    Parallel(ProjectionBase, [DVec3; 2]),
}

impl Projection {
    pub fn base(&self) -> &ProjectionBase {
        match self {
            Projection::Paraxial(base) => base,
            Projection::Parallel(base, _) => base,
        }
    }
}

/// Per-face surface metadata carried only by Quake 2 sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceAttributes {
    pub contents: i32,
    pub flags: i32,
    pub value: f64,
}

/// One bounding half-space of a brush.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// The three points that defined the plane, in source order.
    pub points: [DVec3; 3],
    pub plane: Plane,
    pub texture: String,
    pub projection: Projection,
    pub surface: Option<SurfaceAttributes>,
    /// Source line of the face's first token.
    pub line: u64,
}

/// A convex solid described by its bounding faces, in assembly order.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub faces: Vec<Face>,
    pub first_line: u64,
    pub line_count: u64,
}

/// A map entity: a property dictionary plus any brushes it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Keys keep their first-seen order; a later duplicate key replaces
    /// the earlier value in place.
    pub properties: IndexMap<String, String>,
    pub brushes: Vec<Brush>,
    pub first_line: u64,
    pub line_count: u64,
}

impl Entity {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn classname(&self) -> Option<&str> {
        self.property("classname")
    }
}

/// A fully parsed map source.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub format: Format,
    pub entities: Vec<Entity>,
}
