//! Per-atom model state: classification, bonds, and display colors.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::color::{self, Rgb};
use crate::molecule::residue;
use crate::pdb::AtomRecord;

/// Atom classification, decided once at parse time from the atom and
/// residue names. The kind controls visibility-toggle rules, bond
/// eligibility, and backbone linkage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    /// Non-alpha-carbon atom of a standard amino acid.
    Chain,
    /// Alpha carbon (CA) of a standard amino acid; forms the backbone.
    Alpha,
    /// Atom of a non-amino, non-water residue (ligands, ions, ...).
    Het,
    /// Water (HOH) atom. Excluded from bond inference.
    Water,
}

impl AtomKind {
    pub(crate) fn classify(atom_name: &str, residue_name: &str) -> Self {
        if residue::is_amino_name(residue_name) {
            if atom_name == "CA" {
                Self::Alpha
            } else {
                Self::Chain
            }
        } else if residue_name == "HOH" {
            Self::Water
        } else {
            Self::Het
        }
    }
}

/// One atom of the molecule.
///
/// Cross-references (`residue`, `previous_c_alpha`, `next_c_alpha`, bond
/// keys) are indices into the owning molecule's arenas.
#[derive(Debug, Clone)]
pub struct Atom {
    /// Classification of this atom.
    pub kind: AtomKind,
    /// Trimmed atom name, e.g. "CA" or "OXT".
    pub name: String,
    /// Trimmed residue name, e.g. "ALA".
    pub residue_name: String,
    /// Chain identifier ("" for waters).
    pub chain_id: String,
    /// Sequence number of the owning residue.
    pub sequence_number: i32,
    /// Coordinates in angstroms.
    pub position: Vec3,
    /// Temperature factor (B-factor) from the record.
    pub temperature_factor: f32,
    /// Color for the element coloring method, by atom-name initial.
    pub element_color: Rgb,
    /// Color for the structure coloring method. Starts as the element
    /// color; classification overwrites it for chain atoms.
    pub structure_color: Rgb,
    /// Color for the temperature coloring method, normalized over the
    /// whole molecule.
    pub temperature_color: Rgb,
    /// Resolved display color for the active scheme and hover state.
    pub color: Rgb,
    /// Covalently bonded atom indices with their distances in angstroms.
    pub bonds: FxHashMap<usize, f32>,
    /// Index of the owning residue.
    pub residue: usize,
    /// Backbone link to the previous alpha carbon on the same chain.
    pub previous_c_alpha: Option<usize>,
    /// Backbone link to the next alpha carbon on the same chain.
    pub next_c_alpha: Option<usize>,
    /// Selection state.
    pub selected: bool,
    /// Hover state; hovered atoms render brightened.
    pub hovered: bool,
}

impl Atom {
    pub(crate) fn from_record(record: AtomRecord) -> Self {
        let kind = AtomKind::classify(&record.name, &record.residue_name);
        let element_color = color::element_color(&record.name);

        Self {
            kind,
            name: record.name,
            residue_name: record.residue_name,
            chain_id: record.chain_id,
            sequence_number: record.sequence_number,
            position: record.position,
            temperature_factor: record.temperature_factor,
            element_color,
            structure_color: element_color,
            temperature_color: color::LIGHT_GRAY,
            color: element_color,
            bonds: FxHashMap::default(),
            residue: 0,
            previous_c_alpha: None,
            next_c_alpha: None,
            selected: false,
            hovered: false,
        }
    }
}

/// Normalize temperature factors across the whole atom list and assign the
/// ramp color for the temperature coloring method. A molecule with a flat
/// B-factor column maps everything to the cold end.
pub(crate) fn assign_temperature_colors(atoms: &mut [Atom]) {
    let Some(first) = atoms.first() else { return };

    let mut min = first.temperature_factor;
    let mut max = first.temperature_factor;
    for atom in atoms.iter() {
        min = min.min(atom.temperature_factor);
        max = max.max(atom.temperature_factor);
    }

    let range = max - min;
    for atom in atoms.iter_mut() {
        let relative = if range == 0.0 {
            0.0
        } else {
            (atom.temperature_factor - min) / range
        };
        atom.temperature_color = color::temperature_color(relative);
    }
}
