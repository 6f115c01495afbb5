//! Distance-based bond inference and backbone linkage.

use crate::molecule::atom::{Atom, AtomKind};
use crate::options::BondOptions;

/// Infer covalent bonds between every non-water atom pair closer than the
/// configured cutoff. The squared distance is accumulated one axis at a
/// time with an early exit per axis, which prunes the vast majority of
/// pairs before the full computation.
pub(crate) fn build_bonds(atoms: &mut [Atom], opts: &BondOptions) {
    let cutoff = opts.cutoff_squared;
    let mut count = 0usize;

    for i in 0..atoms.len() {
        if atoms[i].kind == AtomKind::Water {
            continue;
        }
        let p1 = atoms[i].position;

        for j in i + 1..atoms.len() {
            if atoms[j].kind == AtomKind::Water {
                continue;
            }
            let p2 = atoms[j].position;

            let mut distance_squared = (p1.x - p2.x) * (p1.x - p2.x);
            if distance_squared > cutoff {
                continue;
            }
            distance_squared += (p1.y - p2.y) * (p1.y - p2.y);
            if distance_squared > cutoff {
                continue;
            }
            distance_squared += (p1.z - p2.z) * (p1.z - p2.z);
            if distance_squared > cutoff {
                continue;
            }

            let distance = distance_squared.sqrt();

            // i < j, so the split point j puts the pair in separate halves
            let (head, tail) = atoms.split_at_mut(j);
            head[i].bonds.insert(j, distance);
            tail[0].bonds.insert(i, distance);
            count += 1;
        }
    }

    log::debug!("inferred {count} bonds");
}

/// Link consecutive alpha carbons on the same chain into a doubly linked
/// backbone. A chain change breaks the linkage without linking across it.
pub(crate) fn link_backbone(atoms: &mut [Atom]) {
    let mut previous: Option<usize> = None;

    for i in 0..atoms.len() {
        if atoms[i].kind != AtomKind::Alpha {
            continue;
        }

        if let Some(p) = previous {
            if atoms[p].chain_id == atoms[i].chain_id {
                atoms[p].next_c_alpha = Some(i);
                atoms[i].previous_c_alpha = Some(p);
            }
        }

        previous = Some(i);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::pdb::AtomRecord;

    fn atom(name: &str, residue: &str, chain: &str, position: Vec3) -> Atom {
        Atom::from_record(AtomRecord {
            name: name.into(),
            residue_name: residue.into(),
            chain_id: chain.into(),
            sequence_number: 1,
            position,
            temperature_factor: 0.0,
        })
    }

    #[test]
    fn bond_cutoff_boundary() {
        // sqrt(3.6) is about 1.8974: just inside bonds, just outside does not
        let mut close = vec![
            atom("C", "ALA", "A", Vec3::ZERO),
            atom("N", "ALA", "A", Vec3::new(1.897, 0.0, 0.0)),
        ];
        build_bonds(&mut close, &BondOptions::default());
        assert_eq!(close[0].bonds.get(&1).copied(), close[1].bonds.get(&0).copied());
        assert!((close[0].bonds[&1] - 1.897).abs() < 1e-4);

        let mut apart = vec![
            atom("C", "ALA", "A", Vec3::ZERO),
            atom("N", "ALA", "A", Vec3::new(1.9, 0.0, 0.0)),
        ];
        build_bonds(&mut apart, &BondOptions::default());
        assert!(apart[0].bonds.is_empty());
        assert!(apart[1].bonds.is_empty());
    }

    #[test]
    fn axis_pruning_does_not_change_the_result() {
        // Close on x alone but far in 3D
        let mut atoms = vec![
            atom("C", "ALA", "A", Vec3::ZERO),
            atom("N", "ALA", "A", Vec3::new(0.1, 5.0, 0.0)),
        ];
        build_bonds(&mut atoms, &BondOptions::default());
        assert!(atoms[0].bonds.is_empty());
    }

    #[test]
    fn waters_never_bond() {
        let mut atoms = vec![
            atom("O", "HOH", "", Vec3::ZERO),
            atom("C", "ALA", "A", Vec3::new(0.5, 0.0, 0.0)),
            atom("O", "HOH", "", Vec3::new(1.0, 0.0, 0.0)),
        ];
        build_bonds(&mut atoms, &BondOptions::default());
        assert!(atoms.iter().all(|a| a.bonds.is_empty()));
    }

    #[test]
    fn backbone_links_within_a_chain_only() {
        let mut atoms = vec![
            atom("CA", "ALA", "A", Vec3::ZERO),
            atom("CB", "ALA", "A", Vec3::ZERO),
            atom("CA", "GLY", "A", Vec3::ZERO),
            atom("CA", "ALA", "B", Vec3::ZERO),
        ];
        link_backbone(&mut atoms);

        assert_eq!(atoms[0].next_c_alpha, Some(2));
        assert_eq!(atoms[2].previous_c_alpha, Some(0));
        // Chain break: no link from A to B
        assert_eq!(atoms[2].next_c_alpha, None);
        assert_eq!(atoms[3].previous_c_alpha, None);
        // Non-alpha atoms never participate
        assert_eq!(atoms[1].next_c_alpha, None);
    }
}
