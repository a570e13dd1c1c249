//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Comparison tolerance used for perfect-drop detection, colour channel
/// checks and camera settling.
pub const TOLERANCE: f32 = 0.001;

/// Amount added to the active colour channel per spawned block.
pub const COLOR_STEP: f32 = 0.1;

/// A "level" is this many successful placements.
pub const LEVEL_LENGTH: i32 = 6;

/// Cube speed multiplier applied at every level-up.
pub const SPEED_STEP: f32 = 1.03;

/// Store keys for the persisted top score and tower.
pub const TOP_SCORE_KEY: &str = "TopScore";
pub const BUILD_JSON_KEY: &str = "BuildJson";

/// Idle/end-of-game camera framing steps (degrees / world units).
pub const FOV_WIDEN_STEP: f32 = 5.0;
pub const FOV_WIDEN_FINAL: f32 = 10.0;
pub const END_FRAME_LIFT: f32 = 5.0;

/// Minimal 3-D vector. Only the operations the core needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component along a horizontal drop axis.
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    /// Copy with the given axis component replaced.
    pub fn with_axis(mut self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Z => self.z = value,
        }
        self
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// RGBA colour with f32 channels. Channels are deliberately NOT clamped to
/// [0, 1]; progression may push them past 1 and the renderer saturates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB channels.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Channel by index: 0 = red, 1 = green, 2 = blue.
    pub fn channel(&self, index: usize) -> f32 {
        match index {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }

    /// Copy with the indexed channel replaced. Alpha is untouched.
    pub fn with_channel(mut self, index: usize, value: f32) -> Self {
        match index {
            0 => self.r = value,
            1 => self.g = value,
            _ => self.b = value,
        }
        self
    }

    /// Encode as `#RRGGBB`. Alpha is dropped; channels saturate to 8 bits
    /// only for encoding.
    pub fn to_hex(&self) -> String {
        fn byte(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Parse `#RRGGBB` (leading `#` optional). Returns `None` on anything
    /// malformed; callers fall back to white.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self::rgb(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ))
    }
}

/// Horizontal axis a falling block oscillates on. Alternates per spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X,
    Z,
}

impl Axis {
    pub fn flipped(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

/// Game phases. Transitions are governed by the session state machine;
/// anything not in its table is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    Death,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Death => "death",
        }
    }
}

/// Camera defaults captured once at startup by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub default_position: Vec3,
    pub default_fov: f32,
    /// Camera position minus the viewport-center ground projection,
    /// computed by the renderer before the session is built.
    pub ground_offset: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_position: Vec3::new(4.0, 6.0, -5.0),
            default_fov: 60.0,
            ground_offset: Vec3::new(4.0, 6.0, -5.0),
        }
    }
}

/// Session tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Height of the first placed block.
    pub start_position: f32,
    pub initial_cube_speed: f32,
    /// Full footprint of a fresh tower's first block.
    pub block_scale: Vec3,
    /// How far a falling block travels either side of the tower centre.
    pub oscillation_range: f32,
    /// Level-up colours. Channel values should stay 8-bit aligned so hex
    /// round-trips are exact.
    pub palette: Vec<Rgba>,
    pub camera: CameraConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_position: 0.25,
            initial_cube_speed: 2.0,
            block_scale: Vec3::new(2.0, 0.5, 2.0),
            oscillation_range: 3.0,
            palette: vec![
                Rgba::rgb(0.0, 0.2, 0.4),
                Rgba::rgb(0.2, 0.0, 0.4),
                Rgba::rgb(0.4, 0.2, 0.0),
                Rgba::rgb(0.0, 0.4, 0.2),
                Rgba::rgb(0.2, 0.4, 0.0),
            ],
            camera: CameraConfig::default(),
        }
    }
}
