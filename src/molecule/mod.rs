//! Molecule aggregate: model arenas, the construction pipeline, and
//! mutable display state.
//!
//! A [`Molecule`] owns flat arenas of atoms, residues, chains, and fitted
//! ribbons; every cross-reference between them is an index into these
//! arenas. Construction runs the whole pipeline once: parse, backbone
//! linkage, bond inference, temperature normalization, residue and chain
//! assembly, secondary-structure classification, ribbon spline fitting,
//! and cartoon extrusion. After that only display state (view toggles,
//! coloring scheme, selection, hover) mutates, and each mutation notifies
//! the registered observers.

pub mod atom;
mod bonds;
pub mod chain;
pub mod residue;
pub mod ribbon;
pub mod structure;

use std::path::Path;

use glam::Vec3;

pub use atom::{Atom, AtomKind};
pub use chain::Chain;
pub use residue::{BackbonePositions, Residue, RibbonSlot, Selection};
pub use ribbon::Ribbon;
pub use structure::{Structure, StructureKind};

use crate::color::{self, ColorScheme};
use crate::error::MolmeshError;
use crate::geometry::cartoon::{self, SegmentStyle};
use crate::geometry::Aabb;
use crate::options::Options;
use crate::pdb;

/// Display-state change notifications delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoleculeEvent {
    /// Cartoon view toggled.
    ShowCartoonChanged(bool),
    /// Backbone view toggled.
    ShowBackboneChanged(bool),
    /// Full-chain view toggled.
    ShowFullChainChanged(bool),
    /// Heteroatom visibility toggled.
    ShowHetAtomsChanged(bool),
    /// Water visibility toggled.
    ShowWatersChanged(bool),
    /// Coloring scheme switched.
    ColorSchemeChanged(ColorScheme),
    /// Atom or residue selection changed.
    SelectionChanged,
}

type Observer = Box<dyn Fn(&MoleculeEvent)>;

/// A parsed molecule with its derived geometry and display state.
pub struct Molecule {
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
    chains: Vec<Chain>,
    structures: Vec<Structure>,
    ribbons: Vec<Ribbon>,
    bounds: Aabb,
    options: Options,

    show_cartoon: bool,
    show_backbone: bool,
    show_full_chain: bool,
    show_het_atoms: bool,
    show_waters: bool,
    color_scheme: ColorScheme,

    observers: Vec<Observer>,
}

impl Molecule {
    /// Build a molecule from PDB text. The full pipeline runs here; the
    /// result is either a complete molecule or an error.
    pub fn from_pdb(source: &str, options: Options) -> Result<Self, MolmeshError> {
        let parsed = pdb::parse(source)?;

        let mut atoms: Vec<Atom> =
            parsed.atoms.into_iter().map(Atom::from_record).collect();
        bonds::link_backbone(&mut atoms);
        bonds::build_bonds(&mut atoms, &options.bonds);
        atom::assign_temperature_colors(&mut atoms);

        let mut molecule = Self {
            atoms,
            residues: Vec::new(),
            chains: Vec::new(),
            structures: parsed.structures,
            ribbons: Vec::new(),
            bounds: Aabb::from_points(std::iter::empty()),
            options,
            show_cartoon: false,
            show_backbone: false,
            show_full_chain: false,
            show_het_atoms: false,
            show_waters: false,
            color_scheme: ColorScheme::default(),
            observers: Vec::new(),
        };

        molecule.assemble_residues();
        molecule.assemble_chains();
        molecule.classify_structures();
        molecule.build_ribbons()?;
        molecule.build_cartoons();

        molecule.bounds =
            Aabb::from_points(molecule.atoms.iter().map(|a| a.position));
        molecule.refresh_colors();
        molecule.set_show_cartoon(true);

        log::info!(
            "built molecule: {} atoms, {} residues, {} chains, {} ribbons",
            molecule.atoms.len(),
            molecule.residues.len(),
            molecule.chains.len(),
            molecule.ribbons.len()
        );

        Ok(molecule)
    }

    /// Read a PDB file from disk and build a molecule from it.
    pub fn load(path: &Path, options: Options) -> Result<Self, MolmeshError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_pdb(&source, options)
    }

    // ==== ACCESSORS ====

    /// All atoms, in file order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// All residues, in file order.
    #[must_use]
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// All chains; the solvent chain, if any, is last.
    #[must_use]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Parsed secondary-structure records.
    #[must_use]
    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Fitted ribbon splines.
    #[must_use]
    pub fn ribbons(&self) -> &[Ribbon] {
        &self.ribbons
    }

    /// Bounding box of all atom positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// The options this molecule was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Active coloring scheme.
    #[must_use]
    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    #[must_use]
    pub fn show_cartoon(&self) -> bool {
        self.show_cartoon
    }

    #[must_use]
    pub fn show_backbone(&self) -> bool {
        self.show_backbone
    }

    #[must_use]
    pub fn show_full_chain(&self) -> bool {
        self.show_full_chain
    }

    #[must_use]
    pub fn show_het_atoms(&self) -> bool {
        self.show_het_atoms
    }

    #[must_use]
    pub fn show_waters(&self) -> bool {
        self.show_waters
    }

    /// Whether the atom at `index` is visible under the current view
    /// toggles. Alpha carbons show in both the backbone and full-chain
    /// views; other chain atoms only in the full-chain view.
    #[must_use]
    pub fn atom_visible(&self, index: usize) -> bool {
        match self.atoms[index].kind {
            AtomKind::Chain => self.show_full_chain,
            AtomKind::Alpha => self.show_full_chain || self.show_backbone,
            AtomKind::Het => self.show_het_atoms,
            AtomKind::Water => self.show_waters,
        }
    }

    /// Indices of all currently selected atoms.
    #[must_use]
    pub fn selected_atoms(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, a)| a.selected)
            .map(|(i, _)| i)
            .collect()
    }

    // ==== OBSERVERS ====

    /// Register an observer for display-state changes.
    pub fn subscribe(&mut self, observer: impl Fn(&MoleculeEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self, event: &MoleculeEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }

    // ==== DISPLAY STATE ====

    /// Toggle the cartoon view. Enabling it disables the backbone and
    /// full-chain views; the three structural views are mutually
    /// exclusive.
    pub fn set_show_cartoon(&mut self, value: bool) {
        if self.show_cartoon == value {
            return;
        }
        self.show_cartoon = value;
        self.notify(&MoleculeEvent::ShowCartoonChanged(value));
        if value {
            self.set_show_backbone(false);
            self.set_show_full_chain(false);
        }
    }

    /// Toggle the backbone view; enabling it disables the other two
    /// structural views.
    pub fn set_show_backbone(&mut self, value: bool) {
        if self.show_backbone == value {
            return;
        }
        self.show_backbone = value;
        self.notify(&MoleculeEvent::ShowBackboneChanged(value));
        if value {
            self.set_show_cartoon(false);
            self.set_show_full_chain(false);
        }
    }

    /// Toggle the full-chain view; enabling it disables the other two
    /// structural views.
    pub fn set_show_full_chain(&mut self, value: bool) {
        if self.show_full_chain == value {
            return;
        }
        self.show_full_chain = value;
        self.notify(&MoleculeEvent::ShowFullChainChanged(value));
        if value {
            self.set_show_cartoon(false);
            self.set_show_backbone(false);
        }
    }

    /// Toggle heteroatom visibility (independent of the structural views).
    pub fn set_show_het_atoms(&mut self, value: bool) {
        if self.show_het_atoms == value {
            return;
        }
        self.show_het_atoms = value;
        self.notify(&MoleculeEvent::ShowHetAtomsChanged(value));
    }

    /// Toggle water visibility (independent of the structural views).
    pub fn set_show_waters(&mut self, value: bool) {
        if self.show_waters == value {
            return;
        }
        self.show_waters = value;
        self.notify(&MoleculeEvent::ShowWatersChanged(value));
    }

    /// Switch the coloring scheme and recompute every display color.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        if self.color_scheme == scheme {
            return;
        }
        self.color_scheme = scheme;
        self.refresh_colors();
        self.notify(&MoleculeEvent::ColorSchemeChanged(scheme));
    }

    /// Select or deselect one atom, updating its residue's aggregate
    /// selection state.
    pub fn set_atom_selected(&mut self, index: usize, selected: bool) {
        if self.atoms[index].selected == selected {
            return;
        }
        self.atoms[index].selected = selected;
        let residue = self.atoms[index].residue;
        self.update_residue_selection(residue);
        self.notify(&MoleculeEvent::SelectionChanged);
    }

    /// Select or deselect a whole residue.
    pub fn set_residue_selected(&mut self, index: usize, selected: bool) {
        for i in 0..self.residues[index].atoms.len() {
            let a = self.residues[index].atoms[i];
            self.atoms[a].selected = selected;
        }
        self.residues[index].selection =
            if selected { Selection::Full } else { Selection::None };
        self.notify(&MoleculeEvent::SelectionChanged);
    }

    /// Set hover feedback on one atom.
    pub fn set_atom_hovered(&mut self, index: usize, hovered: bool) {
        if self.atoms[index].hovered == hovered {
            return;
        }
        self.atoms[index].hovered = hovered;
        self.refresh_colors();
    }

    /// Set hover feedback on a whole residue.
    pub fn set_residue_hovered(&mut self, index: usize, hovered: bool) {
        if self.residues[index].hovered == hovered {
            return;
        }
        self.residues[index].hovered = hovered;
        self.refresh_colors();
    }

    fn update_residue_selection(&mut self, index: usize) {
        let mut any = false;
        let mut all = true;
        for &a in &self.residues[index].atoms {
            if self.atoms[a].selected {
                any = true;
            } else {
                all = false;
            }
        }
        self.residues[index].selection = if any && all {
            Selection::Full
        } else if any {
            Selection::Partial
        } else {
            Selection::None
        };
    }

    // ==== CONSTRUCTION PIPELINE ====

    /// Group atoms into residues: a new residue starts whenever the
    /// sequence number or chain identifier changes between consecutive
    /// atoms.
    fn assemble_residues(&mut self) {
        for i in 0..self.atoms.len() {
            let start_new = match self.residues.last() {
                None => true,
                Some(r) => {
                    self.atoms[i].sequence_number != r.sequence_number
                        || self.atoms[i].chain_id != r.chain_id
                }
            };

            if start_new {
                self.residues.push(Residue::new(&self.atoms[i], i));
            } else if let Some(r) = self.residues.last_mut() {
                r.atoms.push(i);
            }

            self.atoms[i].residue = self.residues.len() - 1;
        }

        log::debug!("assembled {} residues", self.residues.len());
    }

    /// Group residues into chains by identifier. Waters (empty chain id)
    /// collect into a single solvent chain appended after all the others
    /// regardless of where they appear in the file.
    fn assemble_chains(&mut self) {
        let mut solvent: Option<Chain> = None;

        for index in 0..self.residues.len() {
            if self.residues[index].chain_id.is_empty() {
                solvent
                    .get_or_insert_with(|| Chain::new(String::new()))
                    .residues
                    .push(index);
            } else {
                let start_new = self
                    .chains
                    .last()
                    .map_or(true, |c| c.id != self.residues[index].chain_id);
                if start_new {
                    self.chains
                        .push(Chain::new(self.residues[index].chain_id.clone()));
                }
                let chain_index = self.chains.len() - 1;
                self.chains[chain_index].residues.push(index);
                self.residues[index].chain = Some(chain_index);
            }
        }

        if let Some(chain) = solvent {
            let chain_index = self.chains.len();
            for &r in &chain.residues {
                self.residues[r].chain = Some(chain_index);
            }
            self.chains.push(chain);
        }

        chain::assign_colors(&mut self.chains);
        log::debug!("assembled {} chains", self.chains.len());
    }

    /// Merge parsed structure ranges onto residues and derive the
    /// structure-start/structure-end flags.
    ///
    /// The first matching range wins (ranges are assumed non-overlapping).
    /// The boundary pass then walks residues in order, linking neighbors
    /// that both have complete backbones: a run boundary falls wherever
    /// the chain or the helix/sheet membership changes, or where a residue
    /// without a backbone interrupts the walk.
    fn classify_structures(&mut self) {
        for atom in &mut self.atoms {
            if atom.kind == AtomKind::Chain {
                atom.structure_color = color::LIGHT_GRAY;
            }
        }

        for r in 0..self.residues.len() {
            let matched = self.structures.iter().find(|s| {
                s.contains(
                    &self.residues[r].chain_id,
                    self.residues[r].sequence_number,
                )
            });
            let Some(structure) = matched else { continue };

            match structure.kind {
                StructureKind::Helix => self.residues[r].is_helix = true,
                StructureKind::Sheet => self.residues[r].is_sheet = true,
            }
            let structure_color = structure.kind.color();
            self.residues[r].structure_color = structure_color;
            for i in 0..self.residues[r].atoms.len() {
                let a = self.residues[r].atoms[i];
                self.atoms[a].structure_color = structure_color;
            }
        }

        let mut previous: Option<usize> = None;

        for r in 0..self.residues.len() {
            let Some(backbone) = self.residue_backbone(r) else {
                if let Some(p) = previous {
                    self.residues[p].is_structure_end = true;
                    previous = None;
                }
                continue;
            };
            self.residues[r].backbone = Some(backbone);

            if let Some(p) = previous {
                if self.residues[p].chain != self.residues[r].chain {
                    self.residues[p].is_structure_end = true;
                    previous = None;
                }
            }

            if let Some(p) = previous {
                self.residues[p].next = Some(r);
                self.residues[r].previous = Some(p);

                if self.residues[p].is_sheet != self.residues[r].is_sheet
                    || self.residues[p].is_helix != self.residues[r].is_helix
                {
                    self.residues[p].is_structure_end = true;
                    self.residues[r].is_structure_start = true;
                }
            } else {
                self.residues[r].is_structure_start = true;
            }

            previous = Some(r);
        }

        if let Some(p) = previous {
            self.residues[p].is_structure_end = true;
        }
    }

    /// Locate a residue's alpha carbon and carbonyl oxygen, if both exist.
    fn residue_backbone(&self, index: usize) -> Option<BackbonePositions> {
        let mut c_alpha: Option<Vec3> = None;
        let mut carbonyl_oxygen: Option<Vec3> = None;

        for &a in &self.residues[index].atoms {
            if self.atoms[a].kind == AtomKind::Alpha {
                c_alpha = Some(self.atoms[a].position);
            }
        }
        if c_alpha.is_some() {
            for &a in &self.residues[index].atoms {
                if self.atoms[a].kind == AtomKind::Chain
                    && self.atoms[a].name == "O"
                {
                    carbonyl_oxygen = Some(self.atoms[a].position);
                }
            }
        }

        Some(BackbonePositions {
            c_alpha: c_alpha?,
            carbonyl_oxygen: carbonyl_oxygen?,
        })
    }

    /// Fit one ribbon per maximal run of backbone residues on a single
    /// chain. Runs shorter than four residues stay detached (no ribbon
    /// slot, no cartoon).
    fn build_ribbons(&mut self) -> Result<(), MolmeshError> {
        let mut run: Vec<usize> = Vec::new();

        for r in 0..self.residues.len() {
            if self.residues[r].backbone.is_none() {
                self.finish_ribbon(&mut run)?;
                continue;
            }

            if let Some(&last) = run.last() {
                if self.residues[last].chain_id != self.residues[r].chain_id {
                    self.finish_ribbon(&mut run)?;
                }
            }
            run.push(r);
        }
        self.finish_ribbon(&mut run)?;

        log::debug!("fitted {} ribbons", self.ribbons.len());
        Ok(())
    }

    fn finish_ribbon(&mut self, run: &mut Vec<usize>) -> Result<(), MolmeshError> {
        if run.len() >= 4 {
            let mut geometry = Vec::with_capacity(run.len());
            for &r in run.iter() {
                if let Some(backbone) = &self.residues[r].backbone {
                    geometry.push(ribbon::ResidueGeometry {
                        is_helix: self.residues[r].is_helix,
                        c_alpha: backbone.c_alpha,
                        carbonyl_oxygen: backbone.carbonyl_oxygen,
                    });
                }
            }

            let fitted = Ribbon::build(run.clone(), &geometry)?;
            let ribbon_index = self.ribbons.len();
            for (position, &r) in run.iter().enumerate() {
                self.residues[r].ribbon =
                    Some(RibbonSlot { ribbon: ribbon_index, position });
            }
            self.ribbons.push(fitted);
        }

        run.clear();
        Ok(())
    }

    /// Extrude a cartoon mesh for every residue that joined a ribbon.
    fn build_cartoons(&mut self) {
        for r in 0..self.residues.len() {
            let Some(slot) = self.residues[r].ribbon else { continue };

            let style = if self.residues[r].is_helix {
                SegmentStyle::Helix
            } else if self.residues[r].is_sheet {
                SegmentStyle::Sheet
            } else {
                SegmentStyle::Turn
            };

            let segment = self.ribbons[slot.ribbon].residue_spline(slot.position);
            let mesh = cartoon::build(
                &segment,
                style,
                self.residues[r].is_structure_start,
                self.residues[r].is_structure_end,
                &self.options.cartoon,
            );
            self.residues[r].cartoon = Some(mesh);
        }
    }

    /// Recompute every residue and atom display color for the active
    /// scheme and hover state.
    fn refresh_colors(&mut self) {
        let scheme = self.color_scheme;

        for r in 0..self.residues.len() {
            let chain_color = self.residues[r]
                .chain
                .map_or(color::LIGHT_GRAY, |c| self.chains[c].color);
            let temperature = color::average(
                self.residues[r]
                    .atoms
                    .iter()
                    .map(|&a| self.atoms[a].temperature_color),
            );

            let res = &mut self.residues[r];
            res.color = match scheme {
                ColorScheme::Structure => res.structure_color,
                ColorScheme::Element => {
                    if res.identifier == "O" {
                        color::RED
                    } else {
                        color::LIGHT_GRAY
                    }
                }
                ColorScheme::Residue => res.residue_color,
                ColorScheme::Chain => chain_color,
                ColorScheme::Temperature => temperature,
            };
            if res.hovered {
                res.color = color::hover_highlight(res.color);
            }
        }

        for i in 0..self.atoms.len() {
            let residue = self.atoms[i].residue;
            let residue_color =
                self.residues.get(residue).map_or(color::LIGHT_GRAY, |r| r.residue_color);
            let chain_color = self
                .residues
                .get(residue)
                .and_then(|r| r.chain)
                .map_or(color::LIGHT_GRAY, |c| self.chains[c].color);

            let atom = &mut self.atoms[i];
            let mut resolved = match scheme {
                ColorScheme::Structure => atom.structure_color,
                ColorScheme::Element => atom.element_color,
                ColorScheme::Residue => residue_color,
                ColorScheme::Chain => chain_color,
                ColorScheme::Temperature => atom.temperature_color,
            };
            if atom.hovered {
                resolved = color::hover_highlight(resolved);
            }
            atom.color = resolved;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::Rc;

    use super::*;
    use crate::molecule::ribbon::SAMPLES_PER_RESIDUE;

    fn atom_line(serial: u32, name: &str, residue: &str, chain: char, seq: i32, position: Vec3) -> String {
        format!(
            "ATOM  {serial:>5} {name:<4} {residue:>3} {chain}{seq:>4}    \
             {x:>8.3}{y:>8.3}{z:>8.3}{occ:>6.2}{temp:>6.2}",
            x = position.x,
            y = position.y,
            z = position.z,
            occ = 1.0,
            temp = 20.0,
        )
    }

    fn helix_record(chain: char, start: i32, end: i32) -> String {
        let mut line = vec![b' '; 80];
        line[..5].copy_from_slice(b"HELIX");
        line[19] = chain as u8;
        line[21..25].copy_from_slice(format!("{start:>4}").as_bytes());
        line[33..37].copy_from_slice(format!("{end:>4}").as_bytes());
        String::from_utf8(line).unwrap()
    }

    fn backbone_position(index: i32) -> Vec3 {
        let angle = 1.745 * index as f32;
        Vec3::new(2.3 * angle.cos(), 2.3 * angle.sin(), 1.5 * index as f32)
    }

    /// A synthetic chain of `count` complete residues (CA + O), optionally
    /// skipping the carbonyl oxygen for listed sequence numbers.
    fn chain_pdb(chain: char, count: i32, missing_oxygen: &[i32]) -> String {
        let mut source = String::new();
        let mut serial = 1;
        for seq in 1..=count {
            let ca = backbone_position(seq);
            let _ = writeln!(source, "{}", atom_line(serial, "CA", "ALA", chain, seq, ca));
            serial += 1;
            if !missing_oxygen.contains(&seq) {
                let o = ca + Vec3::new(0.0, 0.0, 2.4);
                let _ = writeln!(source, "{}", atom_line(serial, "O", "ALA", chain, seq, o));
                serial += 1;
            }
        }
        source
    }

    #[test]
    fn minimal_molecule_round_trip() {
        let source = atom_line(1, "CA", "ALA", 'A', 1, Vec3::new(1.0, 2.0, 3.0));
        let molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        assert_eq!(molecule.atoms().len(), 1);
        assert_eq!(molecule.residues().len(), 1);
        assert_eq!(molecule.chains().len(), 1);
        assert!(molecule.ribbons().is_empty());

        let residue = &molecule.residues()[0];
        assert_eq!(residue.identifier, "A");
        assert_eq!(residue.chain, Some(0));
        assert!(residue.cartoon.is_none());

        assert!(molecule.atoms()[0].bonds.is_empty());
        assert_eq!(molecule.chains()[0].color, color::BLUE);
        assert!(molecule.show_cartoon());
        assert_eq!(molecule.bounds().center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn residues_split_on_sequence_or_chain_change() {
        let source = [
            atom_line(1, "N", "ALA", 'A', 1, Vec3::ZERO),
            atom_line(2, "CA", "ALA", 'A', 1, Vec3::new(10.0, 0.0, 0.0)),
            atom_line(3, "N", "GLY", 'A', 2, Vec3::new(20.0, 0.0, 0.0)),
            atom_line(4, "N", "GLY", 'B', 2, Vec3::new(30.0, 0.0, 0.0)),
        ]
        .join("\n");
        let molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        assert_eq!(molecule.residues().len(), 3);
        assert_eq!(molecule.chains().len(), 2);
        assert_eq!(molecule.residues()[0].atoms, vec![0, 1]);
        assert_eq!(molecule.atoms()[2].residue, 1);
        assert_eq!(molecule.atoms()[3].residue, 2);
    }

    #[test]
    fn solvent_chain_is_appended_last_and_red() {
        let source = [
            atom_line(1, "O", "HOH", 'A', 200, Vec3::ZERO),
            atom_line(2, "CA", "ALA", 'A', 1, Vec3::new(10.0, 0.0, 0.0)),
            atom_line(3, "O", "HOH", 'A', 201, Vec3::new(20.0, 0.0, 0.0)),
        ]
        .join("\n");
        let molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        assert_eq!(molecule.chains().len(), 2);
        let solvent = &molecule.chains()[1];
        assert_eq!(solvent.id, "");
        assert_eq!(solvent.color, color::RED);
        assert_eq!(solvent.residues.len(), 2);
        // The protein chain still gets the first palette color
        assert_eq!(molecule.chains()[0].color, color::BLUE);
    }

    #[test]
    fn classifier_flags_run_boundaries() {
        // Residues 1, 5, 6 lack the carbonyl oxygen, so the linked walk
        // covers residues 2..4; the helix range spans 2..4 as well.
        let source = format!(
            "{}\n{}",
            helix_record('A', 2, 4),
            chain_pdb('A', 6, &[1, 5, 6])
        );
        let molecule = Molecule::from_pdb(&source, Options::default()).unwrap();
        let residues = molecule.residues();
        assert_eq!(residues.len(), 6);

        assert!(!residues[0].is_structure_start && !residues[0].is_structure_end);
        assert!(residues[1].is_helix && residues[1].is_structure_start);
        assert!(residues[2].is_helix && !residues[2].is_structure_start && !residues[2].is_structure_end);
        assert!(residues[3].is_helix && residues[3].is_structure_end);
        assert!(!residues[4].is_structure_start && !residues[4].is_structure_end);

        assert_eq!(residues[1].next, Some(2));
        assert_eq!(residues[2].previous, Some(1));
        assert_eq!(residues[0].next, None);

        assert_eq!(residues[1].structure_color, color::BLUE);
        // Atoms in the helix inherit the structure color
        let helix_atom = residues[1].atoms[0];
        assert_eq!(molecule.atoms()[helix_atom].structure_color, color::BLUE);
    }

    #[test]
    fn short_runs_get_no_ribbon() {
        let molecule =
            Molecule::from_pdb(&chain_pdb('A', 3, &[]), Options::default()).unwrap();
        assert!(molecule.ribbons().is_empty());
        assert!(molecule.residues().iter().all(|r| r.ribbon.is_none()));
        assert!(molecule.residues().iter().all(|r| r.cartoon.is_none()));
    }

    #[test]
    fn four_residue_run_is_the_shortest_ribbon() {
        let molecule =
            Molecule::from_pdb(&chain_pdb('A', 4, &[]), Options::default()).unwrap();
        assert_eq!(molecule.ribbons().len(), 1);
        assert!(molecule
            .residues()
            .iter()
            .all(|r| r.ribbon.is_some() && r.cartoon.is_some()));
    }

    #[test]
    fn ribbons_break_on_chain_change() {
        let source = format!("{}{}", chain_pdb('A', 5, &[]), chain_pdb('B', 5, &[]));
        let molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        assert_eq!(molecule.ribbons().len(), 2);
        assert_eq!(molecule.ribbons()[0].residues(), &[0, 1, 2, 3, 4]);
        assert_eq!(molecule.ribbons()[1].residues(), &[5, 6, 7, 8, 9]);
        assert_eq!(
            molecule.ribbons()[0].sample_count(),
            5 * SAMPLES_PER_RESIDUE + 1
        );
    }

    #[test]
    fn every_ribbon_residue_gets_a_cartoon() {
        let source = format!(
            "{}\n{}",
            helix_record('A', 3, 5),
            chain_pdb('A', 8, &[])
        );
        let molecule = Molecule::from_pdb(&source, Options::default()).unwrap();
        assert_eq!(molecule.ribbons().len(), 1);

        for residue in molecule.residues() {
            let slot = residue.ribbon.expect("residue should be on the ribbon");
            let mesh = residue.cartoon.as_ref().expect("cartoon missing");
            assert!(mesh.triangle_count() > 0);
            assert_eq!(
                molecule.ribbons()[slot.ribbon].residue_spline(slot.position).points.len(),
                SAMPLES_PER_RESIDUE + 1
            );
        }

        // Turn residues are thin tubes, helix residues are wide ones
        let radial = molecule.options().cartoon.radial_segments;
        let turn = molecule.residues()[0].cartoon.as_ref().unwrap();
        assert!(turn.vertices.len() >= 11 * radial);
        assert!(molecule.residues()[3].is_helix);
    }

    #[test]
    fn structural_views_are_mutually_exclusive() {
        let molecule_source = chain_pdb('A', 4, &[]);
        let mut molecule =
            Molecule::from_pdb(&molecule_source, Options::default()).unwrap();
        assert!(molecule.show_cartoon());

        let events: Rc<RefCell<Vec<MoleculeEvent>>> = Rc::default();
        let sink = Rc::clone(&events);
        molecule.subscribe(move |event| sink.borrow_mut().push(*event));

        molecule.set_show_backbone(true);
        assert!(molecule.show_backbone());
        assert!(!molecule.show_cartoon());
        assert!(!molecule.show_full_chain());
        assert_eq!(
            *events.borrow(),
            vec![
                MoleculeEvent::ShowBackboneChanged(true),
                MoleculeEvent::ShowCartoonChanged(false),
            ]
        );

        events.borrow_mut().clear();
        molecule.set_show_full_chain(true);
        assert!(!molecule.show_backbone());
        assert!(molecule.show_full_chain());

        // Het/water toggles are independent
        molecule.set_show_het_atoms(true);
        assert!(molecule.show_full_chain());
    }

    #[test]
    fn visibility_follows_atom_kind() {
        let source = [
            atom_line(1, "CA", "ALA", 'A', 1, Vec3::ZERO),
            atom_line(2, "CB", "ALA", 'A', 1, Vec3::new(10.0, 0.0, 0.0)),
            atom_line(3, "FE", "HEM", 'A', 90, Vec3::new(20.0, 0.0, 0.0)),
            atom_line(4, "O", "HOH", 'A', 200, Vec3::new(30.0, 0.0, 0.0)),
        ]
        .join("\n");
        let mut molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        // Cartoon view: no atoms shown
        assert!((0..4).all(|i| !molecule.atom_visible(i)));

        molecule.set_show_backbone(true);
        assert!(molecule.atom_visible(0));
        assert!(!molecule.atom_visible(1));

        molecule.set_show_full_chain(true);
        assert!(molecule.atom_visible(0) && molecule.atom_visible(1));

        molecule.set_show_het_atoms(true);
        molecule.set_show_waters(true);
        assert!(molecule.atom_visible(2) && molecule.atom_visible(3));
    }

    #[test]
    fn color_scheme_switch_recomputes_colors() {
        let source = [
            atom_line(1, "CA", "ALA", 'A', 1, Vec3::ZERO),
            atom_line(2, "N", "ALA", 'A', 1, Vec3::new(1.5, 0.0, 0.0)),
        ]
        .join("\n");
        let mut molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        // Structure scheme: unclassified chain atoms are light gray
        assert_eq!(molecule.atoms()[1].color, color::LIGHT_GRAY);

        molecule.set_color_scheme(ColorScheme::Element);
        assert_eq!(molecule.atoms()[0].color, color::LIGHT_GRAY);
        assert_eq!(molecule.atoms()[1].color, color::BLUE);

        molecule.set_color_scheme(ColorScheme::Chain);
        assert_eq!(molecule.atoms()[0].color, molecule.chains()[0].color);
        assert_eq!(molecule.residues()[0].color, molecule.chains()[0].color);

        molecule.set_color_scheme(ColorScheme::Residue);
        assert_eq!(molecule.residues()[0].color, molecule.residues()[0].residue_color);
    }

    #[test]
    fn selection_aggregates_to_residue_state() {
        let source = [
            atom_line(1, "N", "ALA", 'A', 1, Vec3::ZERO),
            atom_line(2, "CA", "ALA", 'A', 1, Vec3::new(10.0, 0.0, 0.0)),
        ]
        .join("\n");
        let mut molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        molecule.set_atom_selected(0, true);
        assert_eq!(molecule.residues()[0].selection, Selection::Partial);
        assert_eq!(molecule.selected_atoms(), vec![0]);

        molecule.set_atom_selected(1, true);
        assert_eq!(molecule.residues()[0].selection, Selection::Full);

        molecule.set_residue_selected(0, false);
        assert_eq!(molecule.residues()[0].selection, Selection::None);
        assert!(molecule.selected_atoms().is_empty());
    }

    #[test]
    fn hover_brightens_the_resolved_color() {
        let source = atom_line(1, "CA", "ALA", 'A', 1, Vec3::ZERO);
        let mut molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        let base = molecule.atoms()[0].color;
        molecule.set_atom_hovered(0, true);
        assert_eq!(molecule.atoms()[0].color, color::hover_highlight(base));

        molecule.set_atom_hovered(0, false);
        assert_eq!(molecule.atoms()[0].color, base);
    }

    #[test]
    fn backbone_bonds_form_along_dense_chain() {
        // Two chain atoms 1.4 apart bond; waters nearby never do
        let source = [
            atom_line(1, "C", "ALA", 'A', 1, Vec3::ZERO),
            atom_line(2, "N", "ALA", 'A', 2, Vec3::new(1.4, 0.0, 0.0)),
            atom_line(3, "O", "HOH", 'A', 200, Vec3::new(0.7, 0.0, 0.0)),
        ]
        .join("\n");
        let molecule = Molecule::from_pdb(&source, Options::default()).unwrap();

        assert!((molecule.atoms()[0].bonds[&1] - 1.4).abs() < 1e-5);
        assert!(molecule.atoms()[2].bonds.is_empty());
    }
}
