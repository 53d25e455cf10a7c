use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Discrete movement commands understood by [`Camera::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
}

// Keeps look_at well-conditioned near the poles.
const PITCH_LIMIT: f32 = 89.0;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// First-person fly camera.
///
/// Owns all view state (no shared globals): position, a unit forward
/// vector derived from yaw/pitch, and the pointer-tracking reference
/// used to turn absolute cursor coordinates into look deltas. The first
/// pointer sample after construction or [`Camera::reset_pointer_tracking`]
/// only establishes the reference point, so re-acquiring the cursor
/// never causes a view jump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    sensitivity: f32,
    fov_y_deg: f32,
    last_pointer: Option<Vec2>,
}

impl Camera {
    /// Establishes the view from scratch. Angles are in degrees and
    /// should agree with `forward`; the next pointer delta rebuilds
    /// `forward` from them either way.
    pub fn new(
        position: Vec3,
        forward: Vec3,
        up: Vec3,
        sensitivity: f32,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        Self {
            position,
            forward: forward.normalize(),
            up,
            yaw,
            pitch,
            sensitivity,
            fov_y_deg: 45.0,
            last_pointer: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Feeds one absolute cursor sample and returns the updated forward
    /// vector.
    ///
    /// The incoming coordinates are stored before the delta is taken,
    /// so the first sample after tracking starts turns by zero.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Vec3 {
        let current = Vec2::new(x, y);
        let Some(previous) = self.last_pointer.replace(current) else {
            return self.forward;
        };
        let delta = (current - previous) * self.sensitivity;
        self.yaw += delta.x;
        // Screen-space y grows downward while pitch grows upward.
        self.pitch = (self.pitch - delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.forward = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.forward
    }

    /// Forgets the pointer reference; the next sample only re-establishes
    /// it. The surrounding application calls this when it re-acquires
    /// cursor control.
    pub fn reset_pointer_tracking(&mut self) {
        self.last_pointer = None;
    }

    /// Moves the camera by `speed` along the axis the direction selects
    /// and returns the new position.
    pub fn advance(&mut self, direction: MoveDirection, speed: f32) -> Vec3 {
        match direction {
            MoveDirection::Forward => self.position += self.forward * speed,
            MoveDirection::Back => self.position -= self.forward * speed,
            MoveDirection::Left => self.position -= self.right() * speed,
            MoveDirection::Right => self.position += self.right() * speed,
        }
        self.position
    }

    /// View matrix looking from the current position along the forward
    /// vector. Derived fresh on every call; the per-frame uniform
    /// upload never sees a stale matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// Perspective projection for the given aspect ratio (GL depth
    /// range).
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_deg.to_radians(),
            aspect.max(0.01),
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }
}

impl Default for Camera {
    /// The viewer's startup pose: just in front of the origin, looking
    /// down negative z.
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::NEG_Z,
            Vec3::Y,
            0.05,
            -90.0,
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn first_pointer_sample_never_turns() {
        let mut camera = Camera::default();
        let forward = camera.forward();
        assert_eq!(camera.pointer_move(873.0, -41.5), forward);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn reset_suppresses_the_next_delta() {
        let mut camera = Camera::default();
        camera.pointer_move(400.0, 300.0);
        camera.pointer_move(410.0, 290.0);
        let forward = camera.forward();
        camera.reset_pointer_tracking();
        // A huge warp right after a reset must not turn the view.
        assert_eq!(camera.pointer_move(0.0, 10_000.0), forward);
    }

    #[test]
    fn pointer_deltas_accumulate_yaw_and_pitch() {
        let mut camera = Camera::default();
        camera.pointer_move(400.0, 300.0);
        camera.pointer_move(410.0, 290.0);
        assert!((camera.yaw() - -89.5).abs() < TOLERANCE);
        assert!((camera.pitch() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn forward_stays_unit_length() {
        let mut camera = Camera::default();
        let path = [
            (400.0, 300.0),
            (520.0, 260.0),
            (100.0, 580.0),
            (101.5, 579.0),
            (900.0, 0.0),
        ];
        for (x, y) in path {
            let forward = camera.pointer_move(x, y);
            assert!((forward.length() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn pitch_is_clamped_at_the_poles() {
        let mut camera = Camera::default();
        camera.pointer_move(0.0, 10_000.0);
        camera.pointer_move(0.0, 0.0);
        assert_eq!(camera.pitch(), 89.0);
        camera.pointer_move(0.0, 100_000.0);
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn forward_back_round_trips_position() {
        let mut camera = Camera::default();
        let start = camera.position();
        camera.advance(MoveDirection::Forward, 2.5);
        camera.advance(MoveDirection::Back, 2.5);
        assert!((camera.position() - start).length() < TOLERANCE);
    }

    #[test]
    fn strafe_round_trips_position() {
        let mut camera = Camera::default();
        let start = camera.position();
        camera.advance(MoveDirection::Left, 0.7);
        camera.advance(MoveDirection::Right, 0.7);
        assert!((camera.position() - start).length() < TOLERANCE);
    }

    #[test]
    fn strafe_right_follows_the_right_vector() {
        let mut camera = Camera::default();
        // Looking down -z with +y up, right is +x.
        let position = camera.advance(MoveDirection::Right, 1.0);
        assert!((position - Vec3::new(1.0, 0.0, 3.0)).length() < TOLERANCE);
    }

    #[test]
    fn view_matrix_places_the_origin_ahead() {
        let camera = Camera::default();
        let seen = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!((seen - Vec3::new(0.0, 0.0, -3.0)).length() < TOLERANCE);
    }

    #[test]
    fn projection_guards_degenerate_aspect() {
        let camera = Camera::default();
        let projection = camera.projection_matrix(0.0);
        assert!(projection.is_finite());
    }
}
