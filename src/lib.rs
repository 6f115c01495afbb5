//! CPU-side molecular geometry pipeline.
//!
//! Molmesh reconstructs a render-ready representation of a protein from a
//! PDB text stream and procedurally builds the triangle meshes used to draw
//! it in cartoon (ribbon), backbone, full-chain-bond, and space-filling
//! styles. It deliberately stops at the vertex/index buffer boundary: no
//! GPU, windowing, or shader code lives here.
//!
//! # Key entry points
//!
//! - [`molecule::Molecule`] - the aggregate root; parse a stream with
//!   [`molecule::Molecule::from_pdb`] and the full pipeline (bond inference,
//!   residue/chain assembly, secondary-structure classification, ribbon
//!   spline fitting, cartoon extrusion) runs once at construction
//! - [`geometry`] - generated meshes plus standalone icosphere and stick
//!   (capped cylinder) builders for atom spheres and bond cylinders
//! - [`options::Options`] - tuning constants (bond cutoff, cartoon
//!   cross-section dimensions, tessellation counts) with TOML presets
//!
//! # Pipeline
//!
//! Construction is synchronous and atomic: a [`molecule::Molecule`] is
//! either fully built or an error is returned - callers never observe a
//! partially constructed molecule. After construction the display toggles
//! and coloring scheme remain mutable; each setter notifies registered
//! observers so a rendering layer can rebuild its instance buffers.

pub mod color;
pub mod error;
pub mod geometry;
pub mod molecule;
pub mod options;
pub mod pdb;

pub use error::MolmeshError;
pub use molecule::Molecule;
