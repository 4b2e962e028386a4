use glam::DVec3;

/// Components this close to an integer are snapped when reading points.
const CORRECT_EPSILON: f64 = 0.001;

/// Axis-aligned box used as the validity volume for brush construction.
/// The parser passes it through to the geometry kernel untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: DVec3,
    pub max: DVec3,
}

impl Bounds3 {
    pub fn new(min: DVec3, max: DVec3) -> Bounds3 {
        Bounds3 { min, max }
    }

    /// A cube of half-extent `size` centered on the origin.
    pub fn cube(size: f64) -> Bounds3 {
        Bounds3 {
            min: DVec3::splat(-size),
            max: DVec3::splat(size),
        }
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// An oriented plane in constant-normal form: `dot(normal, p) == distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub distance: f64,
}

impl Plane {
    /// The plane through three ordered points, with the normal taken from
    /// `(p3 - p1) x (p2 - p1)`. Returns `None` when the points are
    /// collinear or coincident and no normal exists.
    pub fn from_points(p1: DVec3, p2: DVec3, p3: DVec3) -> Option<Plane> {
        let normal = (p3 - p1).cross(p2 - p1).try_normalize()?;
        Some(Plane {
            normal,
            distance: normal.dot(p1),
        })
    }
}

/// Snaps components that sit within a small epsilon of an integer;
/// legacy editors write near-integral coordinates with float noise.
pub fn correct(v: DVec3) -> DVec3 {
    DVec3::new(
        correct_component(v.x),
        correct_component(v.y),
        correct_component(v.z),
    )
}

fn correct_component(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < CORRECT_EPSILON {
        rounded
    } else {
        value
    }
}
