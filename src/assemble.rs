use glam::DVec3;

use crate::diag::DiagnosticSink;
use crate::error::GeometryError;
use crate::geom::Bounds3;
use crate::repr::{Brush, Face};

/// External kernel that realizes a convex solid from its bounding faces.
///
/// The parser hands over a brush's faces in final order together with the
/// caller's validity volume; the kernel reports whether the planes bound
/// a finite region. A rejection is recoverable: the parser skips the
/// brush and keeps going.
pub trait GeometryKernel {
    fn assemble(&self, bounds: &Bounds3, faces: &[Face]) -> Result<(), GeometryError>;
}

/// Ranking of the six principal half-axes by which one the normal leans
/// into: +X, -X, +Y, -Y, +Z, -Z. Dominant-component ties resolve in
/// X, Y, Z order.
fn axis_weight(normal: DVec3) -> u32 {
    let abs = normal.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        if normal.x >= 0.0 {
            0
        } else {
            1
        }
    } else if abs.y >= abs.z {
        if normal.y >= 0.0 {
            2
        } else {
            3
        }
    } else if normal.z >= 0.0 {
        4
    } else {
        5
    }
}

/// Sorts faces the way qbsp orders them before building brush geometry.
///
/// Two stable passes: the first orders by half-axis weight alone, the
/// second re-sorts with a full tie-break over the plane's distance and
/// normal components. Downstream geometry is sensitive to face order, so
/// the two-pass shape is kept even where it looks redundant.
pub fn order_faces(faces: &mut [Face]) {
    faces.sort_by_key(|face| axis_weight(face.plane.normal));
    faces.sort_by(|a, b| {
        axis_weight(a.plane.normal)
            .cmp(&axis_weight(b.plane.normal))
            .then_with(|| a.plane.distance.total_cmp(&b.plane.distance))
            .then_with(|| a.plane.normal.x.total_cmp(&b.plane.normal.x))
            .then_with(|| a.plane.normal.y.total_cmp(&b.plane.normal.y))
            .then_with(|| a.plane.normal.z.total_cmp(&b.plane.normal.z))
    });
}

/// Orders `faces` and submits them to the kernel. A kernel rejection is
/// reported to the sink and answered with `None` so the caller can skip
/// the brush and keep parsing.
pub(crate) fn build_brush(
    kernel: &dyn GeometryKernel,
    sink: Option<&dyn DiagnosticSink>,
    bounds: &Bounds3,
    mut faces: Vec<Face>,
    first_line: u64,
    line_count: u64,
) -> Option<Brush> {
    order_faces(&mut faces);

    match kernel.assemble(bounds, &faces) {
        Ok(()) => Some(Brush {
            faces,
            first_line,
            line_count,
        }),
        Err(err) => {
            if let Some(sink) = sink {
                sink.report(first_line, &format!("brush discarded: {err}"));
            }
            None
        }
    }
}
