//! Cartoon mesh extrusion: turns one residue's ribbon spline slice into a
//! tube (turns/helices) or flat arrow-capped ribbon (sheets).
//!
//! All math assumes the orientation frames produced by ribbon spline
//! fitting: per-sample unit torsion and normal vectors roughly
//! perpendicular to the spline direction.

use std::f32::consts::TAU;

use glam::Vec3;

use super::{Mesh, MeshVertex};
use crate::options::CartoonOptions;

/// One residue's slice of a fitted ribbon spline: parallel arrays of sample
/// points and their orientation frame vectors.
#[derive(Debug, Clone, Copy)]
pub struct SplineSegment<'a> {
    /// Interpolated spline points.
    pub points: &'a [Vec3],
    /// Unit torsion (cross-section width) vectors per point.
    pub torsion: &'a [Vec3],
    /// Unit normal (cross-section height) vectors per point.
    pub normal: &'a [Vec3],
}

/// Cross-section style for one residue's cartoon segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStyle {
    /// Wide flattened tube.
    Helix,
    /// Flat rectangular ribbon, arrowheaded at the run's end.
    Sheet,
    /// Narrow round tube.
    Turn,
}

/// Build the cartoon mesh for one residue segment.
///
/// `starts_run`/`ends_run` mark whether the residue opens or closes its
/// secondary-structure run, which controls end caps and the sheet
/// arrowhead taper.
#[must_use]
pub fn build(
    segment: &SplineSegment<'_>,
    style: SegmentStyle,
    starts_run: bool,
    ends_run: bool,
    opts: &CartoonOptions,
) -> Mesh {
    let mut mesh = Mesh::default();

    match style {
        SegmentStyle::Helix => {
            let (w, h) = (opts.helix_width, opts.helix_height);
            add_tube(&mut mesh, segment, w, h, opts.radial_segments);
            if starts_run {
                add_tube_cap(&mut mesh, segment, w, h, opts.radial_segments, false);
            }
            if ends_run {
                add_tube_cap(&mut mesh, segment, w, h, opts.radial_segments, true);
            }
        }
        SegmentStyle::Sheet => {
            add_sheet(&mut mesh, segment, opts, ends_run);
            if starts_run || ends_run {
                add_sheet_cap(&mut mesh, segment, opts, starts_run);
            }
        }
        SegmentStyle::Turn => {
            let w = opts.turn_width;
            add_tube(&mut mesh, segment, w, w, opts.radial_segments);
            if starts_run {
                add_tube_cap(&mut mesh, segment, w, w, opts.radial_segments, false);
            }
            if ends_run {
                add_tube_cap(&mut mesh, segment, w, w, opts.radial_segments, true);
            }
        }
    }

    mesh
}

/// Extrude an elliptical cross-section along the spline: one ring of
/// vertices per sample, two triangles per quad face between rings.
fn add_tube(
    mesh: &mut Mesh,
    segment: &SplineSegment<'_>,
    width: f32,
    height: f32,
    radial_segments: usize,
) {
    let base = mesh.vertices.len() as u32;

    for i in 0..segment.points.len() {
        for j in 0..radial_segments {
            let t = TAU * j as f32 / radial_segments as f32;
            let radial =
                width * t.cos() * segment.torsion[i] + height * t.sin() * segment.normal[i];
            // Swapping the radii gives the correct ellipse surface normal
            let normal = (height * t.cos() * segment.torsion[i]
                + width * t.sin() * segment.normal[i])
                .normalize();
            mesh.vertices
                .push(MeshVertex::new(segment.points[i] + radial, normal));
        }
    }

    let rsc = radial_segments as u32;
    for i in 0..segment.points.len() as u32 - 1 {
        for j in 0..rsc {
            let jn = (j + 1) % rsc;
            let a = base + i * rsc + j;
            let b = base + i * rsc + jn;
            let c = base + (i + 1) * rsc + jn;
            let d = base + (i + 1) * rsc + j;
            mesh.push_triangle(a, b, c);
            mesh.push_triangle(a, c, d);
        }
    }
}

/// Fan-triangulated elliptical cap at one end of a tube. Winding flips
/// between the start and end so the cap always faces outward.
fn add_tube_cap(
    mesh: &mut Mesh,
    segment: &SplineSegment<'_>,
    width: f32,
    height: f32,
    radial_segments: usize,
    at_end: bool,
) {
    let offset = if at_end { segment.points.len() - 1 } else { 0 };

    let mut cap_normal =
        segment.torsion[offset].cross(segment.normal[offset]).normalize();
    if at_end {
        cap_normal = -cap_normal;
    }

    let base = mesh.vertices.len() as u32;
    mesh.vertices
        .push(MeshVertex::new(segment.points[offset], cap_normal));

    for i in 0..radial_segments {
        let t = TAU * i as f32 / radial_segments as f32;
        let radial = width * t.cos() * segment.torsion[offset]
            + height * t.sin() * segment.normal[offset];
        mesh.vertices
            .push(MeshVertex::new(segment.points[offset] + radial, cap_normal));

        let next = ((i + 1) % radial_segments) as u32;
        if at_end {
            mesh.push_triangle(base, base + 1 + i as u32, base + 1 + next);
        } else {
            mesh.push_triangle(base, base + 1 + next, base + 1 + i as u32);
        }
    }
}

/// Extrude a flat rectangular cross-section (8 vertices per sample: top,
/// bottom, and side faces with their own normals). When the residue closes
/// its run the half-width tapers linearly from the arrow width to zero,
/// producing the arrowhead, and the side normals are tilted outward in
/// proportion to the taper.
fn add_sheet(
    mesh: &mut Mesh,
    segment: &SplineSegment<'_>,
    opts: &CartoonOptions,
    ends_run: bool,
) {
    let count = segment.points.len();
    let base = mesh.vertices.len() as u32;

    let mut taper_slope = 0.0;
    if ends_run {
        let length = (segment.points[count - 1] - segment.points[0]).length();
        taper_slope = opts.arrow_width / length;
    }

    for i in 0..count {
        let half_width = if ends_run {
            opts.arrow_width * (1.0 - i as f32 / (count - 1) as f32)
        } else {
            opts.sheet_width
        };

        let horizontal = half_width * segment.torsion[i];
        let vertical = opts.sheet_height * segment.normal[i];
        let p = segment.points[i];

        let side_tilt = if ends_run {
            taper_slope * segment.normal[i].cross(segment.torsion[i])
        } else {
            Vec3::ZERO
        };

        let up = segment.normal[i];
        let torsion = segment.torsion[i];

        mesh.vertices.push(MeshVertex::new(p + horizontal + vertical, up));
        mesh.vertices.push(MeshVertex::new(p - horizontal + vertical, up));
        mesh.vertices
            .push(MeshVertex::new(p - horizontal + vertical, -torsion + side_tilt));
        mesh.vertices
            .push(MeshVertex::new(p - horizontal - vertical, -torsion + side_tilt));
        mesh.vertices.push(MeshVertex::new(p - horizontal - vertical, -up));
        mesh.vertices.push(MeshVertex::new(p + horizontal - vertical, -up));
        mesh.vertices
            .push(MeshVertex::new(p + horizontal - vertical, torsion + side_tilt));
        mesh.vertices
            .push(MeshVertex::new(p + horizontal + vertical, torsion + side_tilt));
    }

    // Four faces per ring pair, each face a quad between paired vertices
    for i in 0..count as u32 - 1 {
        for j in 0..4u32 {
            let a = base + i * 8 + 2 * j;
            let b = a + 1;
            let c = base + (i + 1) * 8 + 2 * j + 1;
            let d = base + (i + 1) * 8 + 2 * j;
            mesh.push_triangle(a, b, c);
            mesh.push_triangle(a, c, d);
        }
    }
}

/// Cap a sheet segment: a flat quad at a run start, or the split arrowhead
/// base (two trapezoids spanning sheet width to arrow width) at a run end.
/// Both sit at the segment's first sample, where the arrowhead base
/// widens past the sheet body.
fn add_sheet_cap(
    mesh: &mut Mesh,
    segment: &SplineSegment<'_>,
    opts: &CartoonOptions,
    starts_run: bool,
) {
    let horizontal = opts.sheet_width * segment.torsion[0];
    let vertical = opts.sheet_height * segment.normal[0];
    let p = segment.points[0];

    let p1 = p + horizontal + vertical;
    let p2 = p - horizontal + vertical;
    let p3 = p - horizontal - vertical;
    let p4 = p + horizontal - vertical;

    if starts_run {
        add_sheet_cap_section(mesh, p1, p2, p3, p4);
    } else {
        let arrow_horizontal = opts.arrow_width * segment.torsion[0];

        let p5 = p + arrow_horizontal + vertical;
        let p6 = p - arrow_horizontal + vertical;
        let p7 = p - arrow_horizontal - vertical;
        let p8 = p + arrow_horizontal - vertical;

        add_sheet_cap_section(mesh, p5, p1, p4, p8);
        add_sheet_cap_section(mesh, p2, p6, p7, p3);
    }
}

/// One flat quadrilateral face of a sheet cap.
fn add_sheet_cap_section(mesh: &mut Mesh, p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) {
    let base = mesh.vertices.len() as u32;
    let normal = (p2 - p1).cross(p4 - p1).normalize();

    for p in [p1, p2, p3, p4] {
        mesh.vertices.push(MeshVertex::new(p, normal));
    }

    mesh.push_triangle(base, base + 2, base + 1);
    mesh.push_triangle(base + 2, base, base + 3);
}
