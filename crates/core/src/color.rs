//! Colour progression - per-block channel increments and level-up redraws
//!
//! Each spawned block takes the current colour after bumping one channel by
//! a fixed step. On a level-up the colour is redrawn from the palette and
//! the active channel is redrawn with a remapping step that steers away
//! from already-saturated channels. The remap is a fixed table the game was
//! tuned with; its asymmetries are intentional and must not be "fixed".

use crate::rng::SimpleRng;
use stack_tower_types::{Rgba, COLOR_STEP, TOLERANCE};

/// Remap a drawn channel index given the current colour.
///
/// Table keyed on (drawn index, red nonzero, green nonzero), tolerance
/// 0.001:
/// - 0 with red nonzero goes to 2 if green is also nonzero, else 1
/// - 1 with red nonzero goes to 2
/// - 2 with red zero goes to 0
/// - everything else is unchanged
pub fn remap_channel(drawn: usize, color: Rgba) -> usize {
    let red_nonzero = color.r.abs() > TOLERANCE;
    let green_nonzero = color.g.abs() > TOLERANCE;

    match drawn {
        0 if red_nonzero => {
            if green_nonzero {
                2
            } else {
                1
            }
        }
        1 if red_nonzero => 2,
        2 if !red_nonzero => 0,
        other => other,
    }
}

/// Rolling colour state: the colour the next block will take and the
/// channel being incremented.
#[derive(Debug, Clone, Default)]
pub struct ColorProgression {
    next_color: Rgba,
    channel: usize,
}

impl ColorProgression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Rgba {
        self.next_color
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Redraw the base colour for a fresh game. The channel index is
    /// deliberately left alone; it carries across sessions.
    pub fn reset(&mut self, palette: &[Rgba], rng: &mut SimpleRng) {
        self.next_color = palette[rng.pick_index(palette.len())];
    }

    /// Bump the active channel by the fixed step and return the colour for
    /// the block being spawned. No clamping; channels may exceed 1.
    pub fn advance(&mut self) -> Rgba {
        let bumped = self.next_color.channel(self.channel) + COLOR_STEP;
        self.next_color = self.next_color.with_channel(self.channel, bumped);
        self.next_color
    }

    /// Level-up: redraw colour and channel from the palette.
    pub fn level_up(&mut self, palette: &[Rgba], rng: &mut SimpleRng) {
        self.next_color = palette[rng.pick_index(palette.len())];
        let drawn = rng.pick_index(3);
        self.channel = remap_channel(drawn, self.next_color);
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, color: Rgba, channel: usize) {
        self.next_color = color;
        self.channel = channel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_bumps_only_selected_channel() {
        let mut progression = ColorProgression::new();
        progression.set_state(Rgba::new(0.2, 0.3, 0.4, 0.5), 1);

        let color = progression.advance();
        assert!((color.g - 0.4).abs() < 1e-6);
        assert_eq!(color.r, 0.2);
        assert_eq!(color.b, 0.4);
        assert_eq!(color.a, 0.5);
    }

    #[test]
    fn test_advance_never_clamps() {
        let mut progression = ColorProgression::new();
        progression.set_state(Rgba::rgb(0.95, 0.0, 0.0), 0);

        progression.advance();
        let color = progression.advance();
        assert!(color.r > 1.0);
    }

    #[test]
    fn test_remap_table_is_exact() {
        let red = Rgba::rgb(0.4, 0.0, 0.0);
        let red_green = Rgba::rgb(0.4, 0.2, 0.0);
        let dark = Rgba::rgb(0.0, 0.0, 0.4);

        // drawn 0
        assert_eq!(remap_channel(0, red_green), 2);
        assert_eq!(remap_channel(0, red), 1);
        assert_eq!(remap_channel(0, dark), 0);

        // drawn 1
        assert_eq!(remap_channel(1, red), 2);
        assert_eq!(remap_channel(1, red_green), 2);
        assert_eq!(remap_channel(1, dark), 1);

        // drawn 2
        assert_eq!(remap_channel(2, dark), 0);
        assert_eq!(remap_channel(2, red), 2);
        assert_eq!(remap_channel(2, red_green), 2);
    }

    #[test]
    fn test_remap_tolerance_boundary() {
        // A red channel within tolerance counts as zero.
        let nearly_black = Rgba::rgb(0.0005, 0.5, 0.0);
        assert_eq!(remap_channel(0, nearly_black), 0);
        assert_eq!(remap_channel(2, nearly_black), 0);
    }

    #[test]
    fn test_reset_keeps_channel() {
        let palette = [Rgba::rgb(0.0, 0.2, 0.4)];
        let mut rng = SimpleRng::new(42);
        let mut progression = ColorProgression::new();
        progression.set_state(Rgba::WHITE, 2);

        progression.reset(&palette, &mut rng);
        assert_eq!(progression.current(), palette[0]);
        assert_eq!(progression.channel(), 2);
    }

    #[test]
    fn test_level_up_draws_from_palette() {
        let palette = [
            Rgba::rgb(0.0, 0.2, 0.4),
            Rgba::rgb(0.4, 0.2, 0.0),
            Rgba::rgb(0.2, 0.0, 0.4),
        ];
        let mut rng = SimpleRng::new(99);
        let mut progression = ColorProgression::new();

        for _ in 0..32 {
            progression.level_up(&palette, &mut rng);
            assert!(palette.contains(&progression.current()));
            assert!(progression.channel() < 3);
            // The remap must agree with the drawn colour.
            let c = progression.current();
            if c.r.abs() > TOLERANCE {
                assert_ne!(
                    progression.channel(),
                    0,
                    "red channel re-picked while already saturated"
                );
            }
        }
    }
}
