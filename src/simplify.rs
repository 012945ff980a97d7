//! Shrink-preserving simplification.
//!
//! Two levels: an element whose faces all look the same collapses its face
//! map to one synthetic entry, and a block reduced to a single such cuboid
//! collapses to the minimal uniform encoding. Every collapse is reversible;
//! consumers reconstruct exactly the geometry the full form describes.

use crate::geometry::{BlockShape, Bounds, ElementFaces, ResolvedElement};
use crate::types::Direction;

/// Collapse an element's face map when all six faces share one appearance.
///
/// Faces compare on (texture, uv) only; the cull direction is a per-side
/// hint and is cleared on collapse. Elements with fewer than six faces are
/// left as-is: a missing side is real geometry information.
pub fn simplify_element(mut element: ResolvedElement) -> ResolvedElement {
    let ElementFaces::Directional(faces) = &element.faces else {
        return element;
    };

    if faces.len() != Direction::ALL.len() {
        return element;
    }

    let mut iter = faces.values();
    let Some(first) = iter.next() else {
        return element;
    };
    if !iter.all(|face| face.appearance() == first.appearance()) {
        return element;
    }

    let mut shared = first.clone();
    shared.cullface = None;
    element.faces = ElementFaces::Uniform(shared);
    element
}

/// Reduce a block's elements to the minimal uniform encoding when possible.
///
/// The minimal form applies to a single cuboid whose visible appearance is
/// one (texture, uv) pair: either all six faces collapsed, or exactly one
/// declared face (carpet-like geometry, recorded in `face`). Bounds are
/// dropped when they are the default full cube. Anything else keeps the
/// full element list, each element individually simplified.
pub fn simplify_block(elements: Vec<ResolvedElement>) -> BlockShape {
    let elements: Vec<ResolvedElement> =
        elements.into_iter().map(simplify_element).collect();

    if elements.len() == 1 {
        let element = &elements[0];
        let uniform = match &element.faces {
            ElementFaces::Uniform(face) => Some((face.clone(), None)),
            ElementFaces::Directional(faces) if faces.len() == 1 => faces
                .iter()
                .next()
                .map(|(direction, face)| (face.clone(), Some(*direction))),
            ElementFaces::Directional(_) => None,
        };

        if let Some((face, direction)) = uniform {
            if element.rotation.is_none() {
                let bounds = if element.is_full_cube() {
                    None
                } else {
                    Some(Bounds {
                        from: element.from,
                        to: element.to,
                    })
                };
                return BlockShape::Uniform {
                    bounds,
                    texture: face.texture,
                    uv: face.uv,
                    face: direction,
                };
            }
        }
    }

    BlockShape::Elements(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ResolvedFace;
    use std::collections::BTreeMap;

    fn face(texture: &str, uv: Option<[i32; 4]>, cullface: Option<Direction>) -> ResolvedFace {
        ResolvedFace {
            uv,
            texture: texture.to_string(),
            cullface,
        }
    }

    fn six_faces(texture: &str, uv: Option<[i32; 4]>) -> BTreeMap<Direction, ResolvedFace> {
        Direction::ALL
            .iter()
            .map(|d| (*d, face(texture, uv, Some(*d))))
            .collect()
    }

    fn cube(faces: ElementFaces) -> ResolvedElement {
        ResolvedElement {
            from: [0.0, 0.0, 0.0],
            to: [16.0, 16.0, 16.0],
            rotation: None,
            faces,
        }
    }

    #[test]
    fn test_simplify_element_collapses_equal_faces() {
        let element = cube(ElementFaces::Directional(six_faces("stone.png", None)));
        let simplified = simplify_element(element);

        let ElementFaces::Uniform(shared) = &simplified.faces else {
            panic!("expected uniform faces");
        };
        assert_eq!(shared.texture, "stone.png");
        // Cull hint differs per side and must not survive the collapse.
        assert_eq!(shared.cullface, None);
    }

    #[test]
    fn test_simplify_element_roundtrip() {
        let original = cube(ElementFaces::Directional(six_faces(
            "stone.png",
            Some([0, 0, 16, 16]),
        )));
        let before = original.faces.expand();
        let after = simplify_element(original.clone()).faces.expand();

        for direction in Direction::ALL {
            assert_eq!(before[&direction].appearance(), after[&direction].appearance());
        }
    }

    #[test]
    fn test_simplify_element_keeps_distinct_faces() {
        let mut faces = six_faces("side.png", None);
        faces.insert(Direction::Up, face("top.png", None, Some(Direction::Up)));

        let simplified = simplify_element(cube(ElementFaces::Directional(faces)));
        assert!(matches!(simplified.faces, ElementFaces::Directional(_)));
    }

    #[test]
    fn test_simplify_element_keeps_partial_face_maps() {
        let faces: BTreeMap<Direction, ResolvedFace> =
            [(Direction::Up, face("carpet.png", None, None))].into_iter().collect();

        let simplified = simplify_element(cube(ElementFaces::Directional(faces)));
        // One declared face is geometry, not a collapse candidate.
        assert!(matches!(simplified.faces, ElementFaces::Directional(_)));
    }

    #[test]
    fn test_simplify_block_uniform_cube() {
        let shape = simplify_block(vec![cube(ElementFaces::Directional(six_faces(
            "stone.png",
            None,
        )))]);

        assert_eq!(
            shape,
            BlockShape::Uniform {
                bounds: None,
                texture: "stone.png".to_string(),
                uv: None,
                face: None,
            }
        );
    }

    #[test]
    fn test_simplify_block_keeps_nondefault_bounds() {
        let mut element = cube(ElementFaces::Directional(six_faces("slab.png", None)));
        element.to = [16.0, 8.0, 16.0];

        let shape = simplify_block(vec![element]);
        match shape {
            BlockShape::Uniform { bounds, .. } => {
                let bounds = bounds.expect("non-default bounds must be carried");
                assert_eq!(bounds.to, [16.0, 8.0, 16.0]);
            }
            _ => panic!("expected uniform shape"),
        }
    }

    #[test]
    fn test_simplify_block_single_declared_face() {
        let faces: BTreeMap<Direction, ResolvedFace> = [(
            Direction::Up,
            face("carpet.png", Some([0, 0, 16, 16]), None),
        )]
        .into_iter()
        .collect();

        let shape = simplify_block(vec![cube(ElementFaces::Directional(faces))]);
        assert_eq!(
            shape,
            BlockShape::Uniform {
                bounds: None,
                texture: "carpet.png".to_string(),
                uv: Some([0, 0, 16, 16]),
                face: Some(Direction::Up),
            }
        );
    }

    #[test]
    fn test_simplify_block_keeps_mixed_faces_full() {
        let mut faces = six_faces("side.png", None);
        faces.insert(Direction::Up, face("top.png", None, Some(Direction::Up)));

        let shape = simplify_block(vec![cube(ElementFaces::Directional(faces))]);
        assert!(matches!(shape, BlockShape::Elements(_)));
    }

    #[test]
    fn test_simplify_block_keeps_multi_element_full() {
        let a = cube(ElementFaces::Directional(six_faces("stone.png", None)));
        let mut b = a.clone();
        b.to = [16.0, 8.0, 16.0];

        let shape = simplify_block(vec![a, b]);
        match shape {
            BlockShape::Elements(elements) => {
                assert_eq!(elements.len(), 2);
                // Per-element simplification still applies inside the full form.
                assert!(matches!(elements[0].faces, ElementFaces::Uniform(_)));
            }
            _ => panic!("expected full shape"),
        }
    }
}
