//! Fixed-column PDB record parsing.
//!
//! Only the record types the pipeline consumes are read: ATOM and HETATM
//! for atoms, HELIX and SHEET for secondary structure. Parsing stops at
//! the first ENDMDL so multi-model files yield their first model only.
//! Everything else (REMARK, CONECT, ...) is skipped.

use glam::Vec3;

use crate::error::MolmeshError;
use crate::molecule::structure::{Structure, StructureKind};

/// Raw fields of one ATOM/HETATM record, before model assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Atom name, trimmed (e.g. "CA", "OXT").
    pub name: String,
    /// Residue name, trimmed (e.g. "ALA", "HOH").
    pub residue_name: String,
    /// Chain identifier. A blank identifier becomes "1"; waters always get
    /// the empty identifier so they collect into their own chain.
    pub chain_id: String,
    /// Residue sequence number.
    pub sequence_number: i32,
    /// Coordinates in angstroms.
    pub position: Vec3,
    /// Temperature factor (B-factor).
    pub temperature_factor: f32,
}

/// Everything extracted from one PDB text stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbFile {
    /// Atom records in file order.
    pub atoms: Vec<AtomRecord>,
    /// Secondary-structure records in file order.
    pub structures: Vec<Structure>,
}

/// Parse a PDB text stream.
pub fn parse(source: &str) -> Result<PdbFile, MolmeshError> {
    let mut atoms = Vec::new();
    let mut structures = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;

        if line.starts_with("ENDMDL") {
            break;
        }

        if line.starts_with("ATOM") || line.starts_with("HETATM") {
            atoms.push(parse_atom(line, number)?);
        } else if line.starts_with("HELIX") {
            structures.push(Structure::parse(line, number, StructureKind::Helix)?);
        } else if line.starts_with("SHEET") {
            structures.push(Structure::parse(line, number, StructureKind::Sheet)?);
        }
    }

    log::debug!(
        "parsed {} atom records, {} structure records",
        atoms.len(),
        structures.len()
    );

    Ok(PdbFile { atoms, structures })
}

fn parse_atom(line: &str, number: usize) -> Result<AtomRecord, MolmeshError> {
    let name = field(line, 12, 16, number)?.trim().to_owned();
    let residue_name = field(line, 17, 20, number)?.trim().to_owned();
    let sequence_number = parse_i32(field(line, 22, 26, number)?, number)?;

    let mut chain_id = field(line, 21, 22, number)?.to_owned();
    if residue_name == "HOH" {
        chain_id = String::new();
    } else if chain_id == " " {
        chain_id = "1".to_owned();
    }

    let x = parse_f32(field(line, 30, 38, number)?, number)?;
    let y = parse_f32(field(line, 38, 46, number)?, number)?;
    let z = parse_f32(field(line, 46, 54, number)?, number)?;

    let temperature_factor = parse_f32(field(line, 60, 66, number)?, number)?;

    Ok(AtomRecord {
        name,
        residue_name,
        chain_id,
        sequence_number,
        position: Vec3::new(x, y, z),
        temperature_factor,
    })
}

/// Slice a fixed-column field out of a record line, or fail with the
/// 1-based line number if the line is too short.
pub(crate) fn field(
    line: &str,
    start: usize,
    end: usize,
    number: usize,
) -> Result<&str, MolmeshError> {
    line.get(start..end).ok_or_else(|| MolmeshError::Parse {
        line: number,
        message: format!("record truncated before column {end}"),
    })
}

pub(crate) fn parse_i32(text: &str, number: usize) -> Result<i32, MolmeshError> {
    text.trim().parse().map_err(|_| MolmeshError::Parse {
        line: number,
        message: format!("invalid integer {:?}", text.trim()),
    })
}

pub(crate) fn parse_f32(text: &str, number: usize) -> Result<f32, MolmeshError> {
    text.trim().parse().map_err(|_| MolmeshError::Parse {
        line: number,
        message: format!("invalid number {:?}", text.trim()),
    })
}
