//! Chain grouping and the five-color chain palette.

use crate::color::{self, Rgb};

/// One chain of residues. The solvent chain has the empty identifier and
/// always sits last in the molecule's chain list.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// Alphanumeric chain identifier ("" for the solvent chain).
    pub id: String,
    /// Indices of the constituent residues.
    pub residues: Vec<usize>,
    /// Color for the chain coloring method.
    pub color: Rgb,
}

impl Chain {
    pub(crate) fn new(id: String) -> Self {
        Self { id, residues: Vec::new(), color: color::LIGHT_GRAY }
    }
}

const PALETTE: [Rgb; 5] = [
    color::BLUE,
    color::YELLOW,
    color::GREEN,
    color::ORANGE,
    color::PURPLE,
];

/// Assign chain colors: the palette cycles by list position, except the
/// solvent chain which is always red.
pub(crate) fn assign_colors(chains: &mut [Chain]) {
    for (index, chain) in chains.iter_mut().enumerate() {
        chain.color = if chain.id.is_empty() {
            color::RED
        } else {
            PALETTE[index % PALETTE.len()]
        };
    }
}
