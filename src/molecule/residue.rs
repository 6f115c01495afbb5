//! Residue grouping: amino acid identity, colors, and per-residue
//! secondary-structure state.

use glam::Vec3;

use crate::color::{self, Rgb};
use crate::geometry::Mesh;
use crate::molecule::atom::Atom;

/// Aggregate selection state of a residue, derived from its atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// No atom selected.
    #[default]
    None,
    /// Some but not all atoms selected.
    Partial,
    /// Every atom selected.
    Full,
}

/// Backbone anchor positions for spline fitting. Present only when the
/// residue has both an alpha carbon and a carbonyl oxygen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackbonePositions {
    /// Alpha carbon position.
    pub c_alpha: Vec3,
    /// Carbonyl oxygen position.
    pub carbonyl_oxygen: Vec3,
}

/// A residue's place on a fitted ribbon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RibbonSlot {
    /// Index of the ribbon in the molecule's ribbon list.
    pub ribbon: usize,
    /// Position of this residue within that ribbon.
    pub position: usize,
}

/// One residue (usually an amino acid) and everything derived for it.
#[derive(Debug, Clone)]
pub struct Residue {
    /// Multi-character residue name, e.g. "ALA".
    pub name: String,
    /// Chain identifier shared with the constituent atoms.
    pub chain_id: String,
    /// Residue sequence number.
    pub sequence_number: i32,
    /// Short identifier: single letter for amino acids, "O" for water,
    /// otherwise the full name.
    pub identifier: String,
    /// Color for the residue coloring method.
    pub residue_color: Rgb,
    /// Color for the structure coloring method.
    pub structure_color: Rgb,
    /// Resolved display color for the active scheme and hover state.
    pub color: Rgb,
    /// Indices of the constituent atoms.
    pub atoms: Vec<usize>,
    /// Part of a beta sheet.
    pub is_sheet: bool,
    /// Part of an alpha helix.
    pub is_helix: bool,
    /// First residue of its secondary-structure run.
    pub is_structure_start: bool,
    /// Last residue of its secondary-structure run.
    pub is_structure_end: bool,
    /// Previous backbone residue on the same chain, when linked.
    pub previous: Option<usize>,
    /// Next backbone residue on the same chain, when linked.
    pub next: Option<usize>,
    /// Backbone anchors, when the residue has a complete backbone.
    pub backbone: Option<BackbonePositions>,
    /// Owning chain index, set during chain assembly.
    pub chain: Option<usize>,
    /// Ribbon membership, set when the residue joins a fitted ribbon.
    pub ribbon: Option<RibbonSlot>,
    /// Extruded cartoon mesh for this residue, when it has a ribbon.
    pub cartoon: Option<Mesh>,
    /// Aggregate selection state.
    pub selection: Selection,
    /// Hover state; hovered residues render brightened.
    pub hovered: bool,
}

impl Residue {
    /// Start a new residue from its first atom.
    pub(crate) fn new(atom: &Atom, atom_index: usize) -> Self {
        let identifier = identifier_for(&atom.residue_name);
        let residue_color = residue_color_for(&atom.residue_name);
        let structure_color =
            if identifier == "O" { color::RED } else { color::LIGHT_GRAY };

        Self {
            name: atom.residue_name.clone(),
            chain_id: atom.chain_id.clone(),
            sequence_number: atom.sequence_number,
            identifier,
            residue_color,
            structure_color,
            color: structure_color,
            atoms: vec![atom_index],
            is_sheet: false,
            is_helix: false,
            is_structure_start: false,
            is_structure_end: false,
            previous: None,
            next: None,
            backbone: None,
            chain: None,
            ribbon: None,
            cartoon: None,
            selection: Selection::None,
            hovered: false,
        }
    }
}

/// Whether a residue name is one of the twenty standard amino acids.
pub(crate) fn is_amino_name(name: &str) -> bool {
    matches!(
        name,
        "ALA" | "ARG" | "ASP" | "CYS" | "GLN" | "GLU" | "GLY" | "HIS" | "ILE"
            | "LEU" | "LYS" | "MET" | "PHE" | "PRO" | "SER" | "THR" | "TRP"
            | "TYR" | "VAL" | "ASN"
    )
}

/// Single-letter amino acid code, "O" for water, or the input name when
/// unknown.
fn identifier_for(name: &str) -> String {
    let short = match name {
        "HOH" => "O",
        "ALA" => "A",
        "ARG" => "R",
        "ASP" => "D",
        "CYS" => "C",
        "GLN" => "Q",
        "GLU" => "E",
        "GLY" => "G",
        "HIS" => "H",
        "ILE" => "I",
        "LEU" => "L",
        "LYS" => "K",
        "MET" => "M",
        "PHE" => "F",
        "PRO" => "P",
        "SER" => "S",
        "THR" => "T",
        "TRP" => "W",
        "TYR" => "Y",
        "VAL" => "V",
        "ASN" => "N",
        other => other,
    };
    short.to_owned()
}

fn rgb8(r: u8, g: u8, b: u8) -> Rgb {
    [f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0]
}

/// Fixed per-amino-acid palette for the residue coloring method. ASP has
/// no entry and takes the fallback.
fn residue_color_for(name: &str) -> Rgb {
    match name {
        "HOH" => color::RED,
        "ALA" => rgb8(199, 199, 199),
        "ARG" | "GLU" => rgb8(229, 10, 10),
        "CYS" | "MET" => rgb8(229, 229, 0),
        "GLN" | "ASN" => rgb8(0, 229, 229),
        "GLY" => rgb8(234, 234, 234),
        "HIS" => rgb8(130, 130, 209),
        "ILE" | "LEU" | "VAL" => rgb8(15, 130, 15),
        "LYS" => rgb8(20, 90, 255),
        "PHE" | "TYR" => rgb8(50, 50, 169),
        "PRO" => rgb8(219, 149, 130),
        "SER" | "THR" => rgb8(249, 149, 0),
        "TRP" => rgb8(179, 90, 179),
        _ => color::GREEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amino_names() {
        assert!(is_amino_name("ALA"));
        assert!(is_amino_name("ASN"));
        assert!(!is_amino_name("HOH"));
        assert!(!is_amino_name("HEM"));
    }

    #[test]
    fn identifiers() {
        assert_eq!(identifier_for("ALA"), "A");
        assert_eq!(identifier_for("TRP"), "W");
        assert_eq!(identifier_for("HOH"), "O");
        assert_eq!(identifier_for("HEM"), "HEM");
    }

    #[test]
    fn residue_palette() {
        assert_eq!(residue_color_for("HOH"), color::RED);
        assert_eq!(residue_color_for("ARG"), residue_color_for("GLU"));
        assert_eq!(residue_color_for("HEM"), color::GREEN);
        assert_eq!(residue_color_for("ASP"), color::GREEN);
    }
}
