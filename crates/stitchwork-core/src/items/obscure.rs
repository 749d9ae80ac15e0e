//! Half-legible text for speech bubbles

use crate::world::SimRng;

/// Character that replaces obscured letters
pub const FILLER: char = '.';

pub const DEFAULT_OBSCURE_PROBABILITY: f32 = 0.4;

/// Replace each visible character with [`FILLER`] with the given probability
///
/// Spaces and existing filler characters are kept as-is and draw no random
/// number.
pub fn obscure<R: SimRng + ?Sized>(text: &str, probability: f32, rng: &mut R) -> String {
    text.chars()
        .map(|ch| {
            if ch == ' ' || ch == FILLER {
                ch
            } else if rng.check_probability(probability) {
                FILLER
            } else {
                ch
            }
        })
        .collect()
}
