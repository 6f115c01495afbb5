//! Windowed quadratic spline fitting along a run of backbone residues.
//!
//! Each ribbon covers one maximal run of residues with complete backbones
//! on a single chain. Control points sit between consecutive alpha
//! carbons, oriented by the carbonyl oxygen; the sampled spline carries a
//! torsion/normal frame at every node so the cartoon extruder can sweep a
//! cross-section along it.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::error::MolmeshError;
use crate::geometry::cartoon::SplineSegment;

/// Spline samples generated per residue. Each residue's slice additionally
/// shares one boundary sample with its neighbor, giving 11 points per
/// residue segment.
pub const SAMPLES_PER_RESIDUE: usize = 10;

/// Per-residue input to spline fitting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResidueGeometry {
    pub is_helix: bool,
    pub c_alpha: Vec3,
    pub carbonyl_oxygen: Vec3,
}

/// A fitted ribbon spline over a run of at least four residues.
#[derive(Debug, Clone)]
pub struct Ribbon {
    residues: Vec<usize>,
    points: Vec<Vec3>,
    torsion: Vec<Vec3>,
    normals: Vec<Vec3>,
}

impl Ribbon {
    /// Indices of the member residues, in backbone order.
    #[must_use]
    pub fn residues(&self) -> &[usize] {
        &self.residues
    }

    /// Total number of spline samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.points.len()
    }

    /// The spline slice for the residue at `position` within this ribbon:
    /// `SAMPLES_PER_RESIDUE + 1` points, sharing its boundary samples with
    /// the neighboring residues.
    #[must_use]
    pub fn residue_spline(&self, position: usize) -> SplineSegment<'_> {
        let start = position * SAMPLES_PER_RESIDUE;
        let end = start + SAMPLES_PER_RESIDUE;
        SplineSegment {
            points: &self.points[start..=end],
            torsion: &self.torsion[start..=end],
            normal: &self.normals[start..=end],
        }
    }

    /// Fit the spline for one run of residues. `geometry` holds one entry
    /// per residue in `residues`; the run must have at least four members.
    pub(crate) fn build(
        residues: Vec<usize>,
        geometry: &[ResidueGeometry],
    ) -> Result<Self, MolmeshError> {
        let (helix, ca, oxygen) = padded_inputs(geometry);
        let (control_points, control_torsions) =
            control_lists(&helix, &ca, &oxygen)?;

        let count = geometry.len();
        let mut ribbon = Self {
            residues,
            points: Vec::with_capacity(count * SAMPLES_PER_RESIDUE + 1),
            torsion: Vec::with_capacity(count * SAMPLES_PER_RESIDUE + 1),
            normals: Vec::with_capacity(count * SAMPLES_PER_RESIDUE + 1),
        };
        ribbon.sample_spline(count, &control_points, &control_torsions)?;

        Ok(ribbon)
    }

    /// Walk a four-point control window per residue and emit the sampled
    /// nodes. The first node of the whole ribbon is seeded separately so
    /// its direction vector can be derived by extrapolating backwards.
    fn sample_spline(
        &mut self,
        residue_count: usize,
        control_points: &[Vec3],
        control_torsions: &[Vec3],
    ) -> Result<(), MolmeshError> {
        let mut previous_point = Vec3::ZERO;

        for i in 0..residue_count {
            let p = &control_points[i..i + 4];
            let d = &control_torsions[i..i + 4];

            for j in 1..=SAMPLES_PER_RESIDUE {
                let t = j as f32 / SAMPLES_PER_RESIDUE as f32;

                let (point, torsion_point) = if t < 0.5 {
                    (
                        spline(p[0], p[1], p[2], t + 0.5),
                        spline(d[0], d[1], d[2], t + 0.5),
                    )
                } else {
                    (
                        spline(p[1], p[2], p[3], t - 0.5),
                        spline(d[1], d[2], d[3], t - 0.5),
                    )
                };

                if i == 0 && j == 1 {
                    let first_point = spline(p[0], p[1], p[2], 0.5);
                    let first_torsion = spline(d[0], d[1], d[2], 0.5);
                    let extrapolated = reflect(first_point, point, 1.0);

                    self.push_node(extrapolated, first_point, first_torsion)?;
                    previous_point = first_point;
                }

                self.push_node(previous_point, point, torsion_point)?;
                previous_point = point;
            }
        }

        Ok(())
    }

    fn push_node(
        &mut self,
        previous_point: Vec3,
        point: Vec3,
        torsion_point: Vec3,
    ) -> Result<(), MolmeshError> {
        let torsion = (torsion_point - point).try_normalize().ok_or_else(|| {
            MolmeshError::Geometry("zero-length spline torsion vector".into())
        })?;
        let normal =
            torsion.cross(point - previous_point).try_normalize().ok_or_else(
                || {
                    MolmeshError::Geometry(
                        "degenerate spline tangent (coincident samples)".into(),
                    )
                },
            )?;

        self.points.push(point);
        self.torsion.push(torsion);
        self.normals.push(normal);
        Ok(())
    }
}

/// Copy the per-residue inputs into working lists padded with two
/// extrapolated entries at each end, so every real residue has a full
/// four-point control window around it.
fn padded_inputs(
    geometry: &[ResidueGeometry],
) -> (Vec<bool>, Vec<Vec3>, Vec<Vec3>) {
    let mut helix: Vec<bool> = geometry.iter().map(|g| g.is_helix).collect();
    let mut ca: Vec<Vec3> = geometry.iter().map(|g| g.c_alpha).collect();
    let mut oxygen: Vec<Vec3> =
        geometry.iter().map(|g| g.carbonyl_oxygen).collect();

    helix.insert(0, helix[0]);
    helix.insert(0, helix[1]);
    helix.push(helix[helix.len() - 1]);
    helix.push(helix[helix.len() - 2]);

    pad_positions(&mut ca);
    pad_positions(&mut oxygen);

    (helix, ca, oxygen)
}

/// Reflect the first and last two real points outwards. Both front pads
/// derive from the original first pair because the first insert shifts the
/// indices the second one reads.
fn pad_positions(list: &mut Vec<Vec3>) {
    list.insert(0, reflect(list[0], list[1], 0.4));
    list.insert(0, reflect(list[1], list[2], 0.6));

    list.push(reflect(list[list.len() - 1], list[list.len() - 2], 0.4));
    list.push(reflect(list[list.len() - 2], list[list.len() - 3], 0.6));
}

/// Derive the control point and control torsion lists. Control points sit
/// midway between consecutive alpha carbons, pushed outwards inside
/// helices to fatten the coil; torsion directions flip when they reverse
/// against the previous window to keep the ribbon from twisting.
fn control_lists(
    helix: &[bool],
    ca: &[Vec3],
    oxygen: &[Vec3],
) -> Result<(Vec<Vec3>, Vec<Vec3>), MolmeshError> {
    let mut control_points = Vec::with_capacity(ca.len() - 1);
    let mut control_torsions = Vec::with_capacity(ca.len() - 1);
    let mut previous_direction = Vec3::ZERO;

    for i in 0..ca.len() - 1 {
        let ca1 = ca[i];
        let ca2 = ca[i + 1];
        let o1 = oxygen[i];

        let mut point = (ca1 + ca2) / 2.0;

        let along = ca2 - ca1;
        let to_oxygen = o1 - ca1;

        let offset = along.cross(to_oxygen).try_normalize().ok_or_else(|| {
            MolmeshError::Geometry(
                "collinear backbone atoms in ribbon control frame".into(),
            )
        })?;
        let mut direction =
            along.cross(to_oxygen).cross(along).try_normalize().ok_or_else(
                || {
                    MolmeshError::Geometry(
                        "degenerate ribbon control direction".into(),
                    )
                },
            )?;

        if helix[i] && helix[i + 1] {
            point += 1.5 * offset;
        }

        if i > 0 && direction.angle_between(previous_direction) > FRAC_PI_2 {
            direction = -direction;
        }
        previous_direction = direction;

        control_points.push(point);
        control_torsions.push(point + direction);
    }

    Ok((control_points, control_torsions))
}

/// Reflect `p1` away from `p2` by `amount` times their separation.
fn reflect(p1: Vec3, p2: Vec3, amount: f32) -> Vec3 {
    p1 - amount * (p2 - p1)
}

/// Quadratic B-spline basis over one three-point window.
fn spline(p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let a = (1.0 - t) * (1.0 - t) / 2.0;
    let c = t * t / 2.0;
    let b = 1.0 - a - c;

    a * p1 + b * p2 + c * p3
}
