//! Horizontal alignment between the active cube and the top of the stack

use crate::consts::{ALIGNED_FRACTION, CUBE_WIDTH};

/// How a cube released at some x relates to the cube below it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Nothing below; the first cube always lands
    First,
    /// Offset under half a cube width
    Aligned,
    /// Lands, but off by half a width or more
    Loose,
    /// Offset beyond a full cube width; the cube falls
    Miss,
}

impl Alignment {
    /// Whether a drop with this alignment lands on the stack
    pub fn is_hit(self) -> bool {
        self != Alignment::Miss
    }
}

/// Classify a cube at `active_x` against the top cube at `previous_x`.
///
/// Exactly `CUBE_WIDTH` apart is still a hit.
pub fn classify(active_x: f32, previous_x: Option<f32>) -> Alignment {
    let Some(previous_x) = previous_x else {
        return Alignment::First;
    };

    let diff = (active_x - previous_x).abs();
    if diff > CUBE_WIDTH {
        Alignment::Miss
    } else if diff < CUBE_WIDTH * ALIGNED_FRACTION {
        Alignment::Aligned
    } else {
        Alignment::Loose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_cube() {
        assert_eq!(classify(2.9, None), Alignment::First);
        assert!(Alignment::First.is_hit());
    }

    #[test]
    fn test_color_bands() {
        assert_eq!(classify(0.0, Some(0.4)), Alignment::Aligned);
        assert_eq!(classify(0.0, Some(0.7)), Alignment::Loose);
        assert_eq!(classify(0.0, Some(1.5)), Alignment::Miss);
    }

    #[test]
    fn test_exact_width_is_hit() {
        assert_eq!(classify(1.0, Some(0.0)), Alignment::Loose);
        assert_eq!(classify(-1.0, Some(0.0)), Alignment::Loose);
        assert!(classify(0.0, Some(1.0)).is_hit());
    }

    #[test]
    fn test_half_width_is_not_aligned() {
        assert_eq!(classify(0.5, Some(0.0)), Alignment::Loose);
    }

    proptest! {
        #[test]
        fn prop_hit_iff_within_width(active in -3.0f32..3.0, previous in -3.0f32..3.0) {
            let hit = classify(active, Some(previous)).is_hit();
            prop_assert_eq!(hit, (active - previous).abs() <= CUBE_WIDTH);
        }

        #[test]
        fn prop_classification_is_symmetric(active in -3.0f32..3.0, previous in -3.0f32..3.0) {
            prop_assert_eq!(
                classify(active, Some(previous)),
                classify(previous, Some(active))
            );
        }
    }
}
