//! Parsed secondary-structure records (HELIX / SHEET).

use crate::color::{self, Rgb};
use crate::error::MolmeshError;
use crate::pdb;

/// Secondary-structure record variant. The two variants read their fields
/// from different fixed columns and carry a fixed display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// Alpha helix (HELIX record).
    Helix,
    /// Beta sheet strand (SHEET record).
    Sheet,
}

impl StructureKind {
    /// Color used for the structure coloring method.
    #[must_use]
    pub fn color(self) -> Rgb {
        match self {
            Self::Helix => color::BLUE,
            Self::Sheet => color::ORANGE,
        }
    }

    /// Column offsets of (chain id, start sequence number, end sequence
    /// number) within the record line.
    fn columns(self) -> (usize, usize, usize) {
        match self {
            Self::Helix => (19, 21, 33),
            Self::Sheet => (21, 22, 33),
        }
    }
}

/// One contiguous secondary-structure range on a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    /// Helix or sheet.
    pub kind: StructureKind,
    /// Chain the range applies to, exactly as recorded.
    pub chain_id: String,
    /// Sequence number of the first residue in the range.
    pub start: i32,
    /// Sequence number of the last residue in the range (inclusive).
    pub end: i32,
}

impl Structure {
    pub(crate) fn parse(
        line: &str,
        number: usize,
        kind: StructureKind,
    ) -> Result<Self, MolmeshError> {
        let (chain_col, start_col, end_col) = kind.columns();

        let chain_id = pdb::field(line, chain_col, chain_col + 1, number)?.to_owned();
        let start =
            pdb::parse_i32(pdb::field(line, start_col, start_col + 4, number)?, number)?;
        let end =
            pdb::parse_i32(pdb::field(line, end_col, end_col + 4, number)?, number)?;

        Ok(Self { kind, chain_id, start, end })
    }

    /// Whether a residue with the given chain id and sequence number falls
    /// inside this range.
    #[must_use]
    pub fn contains(&self, chain_id: &str, sequence_number: i32) -> bool {
        self.chain_id == chain_id && (self.start..=self.end).contains(&sequence_number)
    }
}
