//! Stacking engine - block placement, overlap clamping and trim geometry
//!
//! Owns the placed stack and the currently falling block. A drop resolves
//! the falling block against the previous one along the oscillation axis:
//! the overlap interval becomes the new block's footprint, the remainder is
//! reported as a trash piece, and zero overlap terminates the game.

use stack_tower_types::{Axis, GameConfig, Rgba, Vec3, TOLERANCE};

/// A placed, immutable tower segment.
///
/// `scored` stays unset until a perfect drop marks both the block and its
/// predecessor; persistence keeps blocks whose flag is unset or true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub position: Vec3,
    pub scale: Vec3,
    pub color: Rgba,
    pub scored: Option<bool>,
}

impl Block {
    pub fn new(position: Vec3, scale: Vec3, color: Rgba) -> Self {
        Self {
            position,
            scale,
            color,
            scored: None,
        }
    }

    /// Footprint interval along an axis (center +- half extent).
    pub fn footprint(&self, axis: Axis) -> (f32, f32) {
        let center = self.position.axis(axis);
        let half = self.scale.axis(axis) * 0.5;
        (center - half, center + half)
    }

    /// Whether persistence retains this block.
    pub fn survives_save(&self) -> bool {
        self.scored.unwrap_or(true)
    }
}

/// Trimmed remainder geometry handed to the external factory. Never enters
/// the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrashPiece {
    pub position: Vec3,
    pub size: Vec3,
    pub color: Rgba,
}

/// The block currently oscillating above the tower, awaiting a drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingBlock {
    pub position: Vec3,
    pub scale: Vec3,
    pub color: Rgba,
    pub axis: Axis,
    pub speed: f32,
    direction: f32,
    min: f32,
    max: f32,
}

impl FallingBlock {
    /// Ping-pong one step along the oscillation axis.
    pub fn step(&mut self, dt: f32) {
        let mut at = self.position.axis(self.axis) + self.direction * self.speed * dt;
        if at >= self.max {
            at = self.max;
            self.direction = -1.0;
        } else if at <= self.min {
            at = self.min;
            self.direction = 1.0;
        }
        self.position = self.position.with_axis(self.axis, at);
    }

    pub fn footprint(&self) -> (f32, f32) {
        let center = self.position.axis(self.axis);
        let half = self.scale.axis(self.axis) * 0.5;
        (center - half, center + half)
    }

    /// Travel bounds, for tests and renderers.
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

/// Result of resolving a drop against the previous block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    Placed {
        block: Block,
        trash: Option<TrashPiece>,
        overlap_fraction: f32,
        perfect: bool,
    },
    /// Zero overlap: the whole falling block is the remainder and the game
    /// ends.
    Missed { trash: TrashPiece },
}

/// Ordered sequence of placed blocks plus the falling block.
#[derive(Debug, Clone, Default)]
pub struct CubeStack {
    blocks: Vec<Block>,
    falling: Option<FallingBlock>,
    next_axis: Axis,
}

impl CubeStack {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            falling: None,
            next_axis: Axis::X,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn first(&self) -> Option<&Block> {
        self.blocks.first()
    }

    pub fn last(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn falling(&self) -> Option<&FallingBlock> {
        self.falling.as_ref()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.falling = None;
        self.next_axis = Axis::X;
    }

    /// Replace the placed blocks with a tower loaded from storage.
    pub fn restore(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.falling = None;
        self.next_axis = Axis::X;
    }

    /// Advance the falling block's oscillation by one frame.
    pub fn advance_falling(&mut self, dt: f32) {
        if let Some(falling) = self.falling.as_mut() {
            falling.step(dt);
        }
    }

    /// Place the first block at the configured start height with the full
    /// configured footprint. No overlap check.
    pub fn spawn_first(&mut self, config: &GameConfig, color: Rgba) -> Block {
        let block = Block::new(
            Vec3::new(0.0, config.start_position, 0.0),
            config.block_scale,
            color,
        );
        self.blocks.push(block);
        block
    }

    /// Spawn an oscillating block directly above the last placed block.
    /// The footprint is copied from it; the axis alternates per spawn.
    /// Returns `None` when the stack is empty.
    pub fn spawn_falling(&mut self, speed: f32, range: f32, color: Rgba) -> Option<FallingBlock> {
        let prev = *self.blocks.last()?;
        let axis = self.next_axis;
        self.next_axis = axis.flipped();

        let center = prev.position.axis(axis);
        let mut position = prev.position.with_axis(axis, center - range);
        position.y = prev.position.y + prev.scale.y;

        let falling = FallingBlock {
            position,
            scale: prev.scale,
            color,
            axis,
            speed,
            direction: 1.0,
            min: center - range,
            max: center + range,
        };
        self.falling = Some(falling);
        Some(falling)
    }

    /// Resolve the falling block against the last placed block. `None` when
    /// there is nothing to resolve.
    pub fn resolve_drop(&mut self) -> Option<DropOutcome> {
        let falling = self.falling.take()?;
        let prev = *self.blocks.last()?;
        let axis = falling.axis;

        let (f_min, f_max) = falling.footprint();
        let (p_min, p_max) = prev.footprint(axis);
        let lo = f_min.max(p_min);
        let hi = f_max.min(p_max);
        let overlap = hi - lo;
        let pre_drop_len = falling.scale.axis(axis);

        if overlap <= 0.0 {
            return Some(DropOutcome::Missed {
                trash: TrashPiece {
                    position: falling.position,
                    size: falling.scale,
                    color: falling.color,
                },
            });
        }

        let overlap_fraction = overlap / pre_drop_len;
        let perfect = (overlap_fraction - 1.0).abs() < TOLERANCE;

        let mut position = prev.position.with_axis(axis, (lo + hi) * 0.5);
        position.y = falling.position.y;
        let scale = prev.scale.with_axis(axis, overlap);

        let mut block = Block::new(position, scale, falling.color);
        if perfect {
            block.scored = Some(true);
            if let Some(last) = self.blocks.last_mut() {
                last.scored = Some(true);
            }
        }

        let remainder = pre_drop_len - overlap;
        let trash = if remainder > TOLERANCE {
            let falling_center = falling.position.axis(axis);
            let trash_center = if falling_center > (lo + hi) * 0.5 {
                hi + remainder * 0.5
            } else {
                lo - remainder * 0.5
            };
            Some(TrashPiece {
                position: falling.position.with_axis(axis, trash_center),
                size: falling.scale.with_axis(axis, remainder),
                color: falling.color,
            })
        } else {
            None
        };

        self.blocks.push(block);
        Some(DropOutcome::Placed {
            block,
            trash,
            overlap_fraction,
            perfect,
        })
    }
}
