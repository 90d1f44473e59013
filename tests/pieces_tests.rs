//! Masks, rotations, templates and the catalog.

use blockfall::core::{Catalog, CoreError, Mask, PieceInstance, PieceTemplate};
use blockfall::types::{Color, Position, Rotation, RotationKind, MAX_PIECE_EXTENT};
use std::sync::Arc;

#[test]
fn test_mask_size_mismatch_rejected() {
    assert_eq!(
        Mask::new(2, 2, vec![true; 3]).unwrap_err(),
        CoreError::MaskSizeMismatch {
            width: 2,
            height: 2,
            cells: 3
        }
    );
}

#[test]
fn test_oversized_and_empty_masks_rejected() {
    let n = MAX_PIECE_EXTENT + 1;
    assert!(matches!(
        Mask::new(n, 1, vec![true; n]),
        Err(CoreError::PieceTooLarge { .. })
    ));
    assert!(matches!(
        Mask::new(2, 1, vec![false, false]),
        Err(CoreError::InvalidMask(_))
    ));
}

#[test]
fn test_template_rejects_bad_cells() {
    assert!(PieceTemplate::new("bad", 3, 1, vec![true, true], Color::RED).is_err());
    let ok = PieceTemplate::new("ok", 3, 1, vec![true, true, true], Color::RED).unwrap();
    assert_eq!(ok.size(), Position::new(3, 1));
}

#[test]
fn test_empty_catalog_rejected() {
    assert_eq!(Catalog::new(Vec::new()).unwrap_err(), CoreError::EmptyCatalog);
}

#[test]
fn test_standard_catalog() {
    let catalog = Catalog::standard();
    assert_eq!(catalog.len(), 7);
    for name in ["I", "O", "T", "S", "Z", "J", "L"] {
        let template = catalog.get(name).unwrap();
        assert_eq!(template.mask().solid_cells().count(), 4, "{}", name);
    }
    assert!(catalog.get("Q").is_none());
}

#[test]
fn test_four_right_rotations_restore_mask() {
    for template in Catalog::standard().templates() {
        let original = template.mask().clone();
        let mut mask = original.clone();
        for _ in 0..4 {
            mask = mask.rotated(RotationKind::Right);
        }
        assert_eq!(mask, original, "{}", template.name());
    }
}

#[test]
fn test_left_undoes_right() {
    let l = Mask::parse(&["..X", "XXX"]).unwrap();
    assert_eq!(l.rotated(RotationKind::Right).rotated(RotationKind::Left), l);
    assert_eq!(l.rotated(RotationKind::Left).rotated(RotationKind::Right), l);
    assert_eq!(
        l.rotated(RotationKind::Twice),
        l.rotated(RotationKind::Right).rotated(RotationKind::Right)
    );
}

#[test]
fn test_quarter_turn_swaps_size_but_half_turn_does_not() {
    let mask = Mask::parse(&["XXX", "X.."]).unwrap();
    assert_eq!(mask.rotated(RotationKind::Right).size(), Position::new(2, 3));
    assert_eq!(mask.rotated(RotationKind::Left).size(), Position::new(2, 3));
    assert_eq!(mask.rotated(RotationKind::Twice).size(), Position::new(3, 2));
}

#[test]
fn test_rotate_right_cell_mapping() {
    // X X X        X X
    // X . .   ->   . X
    //              . X
    let rotated = Mask::parse(&["XXX", "X.."])
        .unwrap()
        .rotated(RotationKind::Right);
    assert_eq!(rotated, Mask::parse(&["XX", ".X", ".X"]).unwrap());
}

#[test]
fn test_instance_orientation() {
    let template = Arc::new(PieceTemplate::from_mask(
        "I",
        Mask::parse(&["XXXX"]).unwrap(),
        Color::CYAN,
    ));

    let east = PieceInstance::new(Arc::clone(&template), Rotation::East);
    assert_eq!(east.size(), Position::new(1, 4));
    assert_eq!(east.mask(), template.mask().rotated(RotationKind::Right));

    let south = PieceInstance::new(Arc::clone(&template), Rotation::South);
    assert_eq!(south.size(), Position::new(4, 1));

    let west = PieceInstance::new(template, Rotation::West);
    assert_eq!(west.color(), Color::CYAN);
    assert_eq!(west.size(), Position::new(1, 4));
}
