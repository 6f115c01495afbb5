//! Pipeline tuning options with TOML preset support.
//!
//! Every numeric constant the geometry pipeline depends on (bond cutoff,
//! cartoon cross-section dimensions, tessellation counts) is collected
//! here. The defaults reproduce the values the pipeline was originally
//! tuned with; their rationale is undocumented, so treat them as opaque
//! compatibility constants rather than derived physical quantities.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MolmeshError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[cartoon]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Covalent bond inference parameters.
    pub bonds: BondOptions,
    /// Cartoon (ribbon) extrusion parameters.
    pub cartoon: CartoonOptions,
    /// Atom sphere tessellation parameters.
    pub sphere: SphereOptions,
    /// Bond cylinder tessellation parameters.
    pub stick: StickOptions,
}

/// Bond inference parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BondOptions {
    /// Squared distance threshold in angstroms squared. Two non-water atoms
    /// closer than the square root of this value are considered covalently
    /// bonded.
    pub cutoff_squared: f32,
}

impl Default for BondOptions {
    fn default() -> Self {
        Self { cutoff_squared: 3.6 }
    }
}

/// Cartoon cross-section dimensions in angstroms, plus tessellation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CartoonOptions {
    /// Number of vertices per tube cross-section ring.
    pub radial_segments: usize,
    /// Radius of the round tube used for turns and unclassified runs.
    pub turn_width: f32,
    /// Half-width of the flattened helix tube along the torsion vector.
    pub helix_width: f32,
    /// Half-height of the flattened helix tube along the normal vector.
    pub helix_height: f32,
    /// Half-width of the flat sheet ribbon.
    pub sheet_width: f32,
    /// Half-height of the flat sheet ribbon.
    pub sheet_height: f32,
    /// Half-width of the arrowhead base at a sheet's final residue.
    pub arrow_width: f32,
}

impl Default for CartoonOptions {
    fn default() -> Self {
        Self {
            radial_segments: 10,
            turn_width: 0.2,
            helix_width: 1.4,
            helix_height: 0.25,
            sheet_width: 1.2,
            sheet_height: 0.25,
            arrow_width: 1.6,
        }
    }
}

/// Icosphere subdivision count for atom rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereOptions {
    /// Recursive subdivision count; level 1 is the 8-triangle seed.
    pub divisions: usize,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self { divisions: 3 }
    }
}

/// Capped cylinder parameters for bond rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StickOptions {
    /// Cylinder radius.
    pub radius: f32,
    /// Distance the rear cap center extends behind the cylinder origin.
    pub cap_offset: f32,
    /// Number of radial segments around the cylinder.
    pub divisions: usize,
}

impl Default for StickOptions {
    fn default() -> Self {
        Self { radius: 0.2, cap_offset: 0.2, divisions: 10 }
    }
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolmeshError> {
        let content =
            std::fs::read_to_string(path).map_err(MolmeshError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MolmeshError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolmeshError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolmeshError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolmeshError::Io)?;
        }
        std::fs::write(path, content).map_err(MolmeshError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[cartoon]
helix_width = 1.6
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.cartoon.helix_width, 1.6);
        // Everything else should be default
        assert_eq!(opts.cartoon.turn_width, 0.2);
        assert_eq!(opts.bonds.cutoff_squared, 3.6);
        assert_eq!(opts.stick.divisions, 10);
    }
}
