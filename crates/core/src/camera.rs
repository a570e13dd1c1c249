//! Camera target planner - computes where the renderer should look
//!
//! The core never interpolates; it publishes a target position and field of
//! view, and the renderer eases toward them on its own schedule. Frustum
//! visibility is an external question answered through `FrustumProbe`.

use stack_tower_types::{
    CameraConfig, Vec3, END_FRAME_LIFT, FOV_WIDEN_FINAL, FOV_WIDEN_STEP,
};

/// Renderer-supplied visibility predicate.
pub trait FrustumProbe {
    fn is_visible(&self, point: Vec3) -> bool;
}

#[derive(Debug, Clone)]
pub struct CameraTargetPlanner {
    config: CameraConfig,
    target: Vec3,
    fov: f32,
    /// One-shot end-of-game widen still owed once the tower fits the
    /// frustum.
    end_framing_pending: bool,
}

impl CameraTargetPlanner {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            target: config.default_position,
            fov: config.default_fov,
            end_framing_pending: false,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn end_framing_pending(&self) -> bool {
        self.end_framing_pending
    }

    /// Back to defaults for a fresh game; the end-framing shot is re-armed
    /// for whenever this game ends.
    pub fn reset(&mut self) {
        self.target = self.config.default_position;
        self.fov = self.config.default_fov;
        self.end_framing_pending = true;
    }

    /// Arm the end-framing shot without touching the target; used when a
    /// persisted tower is rebuilt for idle display.
    pub fn arm_end_framing(&mut self) {
        self.end_framing_pending = true;
    }

    /// Follow target while playing: last placed block plus the fixed
    /// ground-plane offset.
    pub fn follow(&mut self, last_block_position: Vec3) {
        self.target = last_block_position + self.config.ground_offset;
    }

    /// End-of-session framing: default position lifted by the vertical
    /// midpoint of the first and last placed blocks.
    pub fn frame_death(&mut self, first: Vec3, last: Vec3) {
        let mid_y = (first.y + last.y) * 0.5;
        let base = self.config.default_position;
        self.target = Vec3::new(base.x, base.y + mid_y, base.z);
    }

    /// Idle framing during Menu/Death: widen the view until both tower
    /// endpoints are in frustum, then take the one-shot final widen + lift.
    pub fn frame_idle(
        &mut self,
        probe: &dyn FrustumProbe,
        first: Option<Vec3>,
        last: Option<Vec3>,
    ) {
        let visible = match (first, last) {
            (Some(first), Some(last)) => probe.is_visible(first) && probe.is_visible(last),
            // No tower: nothing to bring into view.
            _ => true,
        };

        if !visible {
            self.fov += FOV_WIDEN_STEP;
            return;
        }

        if self.end_framing_pending {
            self.end_framing_pending = false;
            self.fov += FOV_WIDEN_FINAL;
            self.target.y += END_FRAME_LIFT;
        }
    }
}
