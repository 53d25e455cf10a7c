use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::{KeyCode, NamedKey};

/// Axis of the time-driven spin applied to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinAxis {
    X,
    Y,
    Z,
}

const SCALE_STEP: f32 = 0.1;
const TRANSLATE_STEP: f32 = 0.1;

/// Model-matrix parameters driven from key events: one spin axis at a
/// time, a translation, and a uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelTransform {
    pub spin: Option<SpinAxis>,
    pub translation: Vec3,
    pub scale: f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            spin: None,
            translation: Vec3::ZERO,
            scale: 0.5,
        }
    }
}

impl ModelTransform {
    /// Selects the spin axis; the axes are mutually exclusive.
    pub fn set_spin(&mut self, axis: SpinAxis) {
        self.spin = Some(axis);
    }

    pub fn clear_spin(&mut self) {
        self.spin = None;
    }

    /// Applies the viewer's model-control bindings for a pressed key:
    /// X/Y/Z pick the spin axis, `[`/`]` shrink and grow the scale,
    /// arrow keys nudge the translation.
    pub fn apply_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Character('X') => self.set_spin(SpinAxis::X),
            KeyCode::Character('Y') => self.set_spin(SpinAxis::Y),
            KeyCode::Character('Z') => self.set_spin(SpinAxis::Z),
            KeyCode::Character('[') => self.scale = (self.scale - SCALE_STEP).max(SCALE_STEP),
            KeyCode::Character(']') => self.scale += SCALE_STEP,
            KeyCode::Named(NamedKey::Left) => self.translation.x -= TRANSLATE_STEP,
            KeyCode::Named(NamedKey::Right) => self.translation.x += TRANSLATE_STEP,
            KeyCode::Named(NamedKey::Up) => self.translation.y += TRANSLATE_STEP,
            KeyCode::Named(NamedKey::Down) => self.translation.y -= TRANSLATE_STEP,
            _ => {}
        }
    }

    /// Composes the model matrix for the given spin angle in radians,
    /// rotation first, then translation, then scale.
    pub fn matrix(&self, angle_rad: f32) -> Mat4 {
        let rotation = match self.spin {
            Some(SpinAxis::X) => Mat4::from_rotation_x(angle_rad),
            Some(SpinAxis::Y) => Mat4::from_rotation_y(angle_rad),
            Some(SpinAxis::Z) => Mat4::from_rotation_z(angle_rad),
            None => Mat4::IDENTITY,
        };
        rotation * Mat4::from_translation(self.translation) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn spin_axes_are_mutually_exclusive() {
        let mut transform = ModelTransform::default();
        transform.apply_key(KeyCode::character('x'));
        assert_eq!(transform.spin, Some(SpinAxis::X));
        transform.apply_key(KeyCode::character('z'));
        assert_eq!(transform.spin, Some(SpinAxis::Z));
        transform.clear_spin();
        assert_eq!(transform.spin, None);
    }

    #[test]
    fn scale_keys_step_and_never_reach_zero() {
        let mut transform = ModelTransform::default();
        transform.apply_key(KeyCode::Character(']'));
        assert!((transform.scale - 0.6).abs() < TOLERANCE);
        for _ in 0..20 {
            transform.apply_key(KeyCode::Character('['));
        }
        assert!(transform.scale >= SCALE_STEP);
    }

    #[test]
    fn arrow_keys_nudge_translation() {
        let mut transform = ModelTransform::default();
        transform.apply_key(KeyCode::Named(NamedKey::Right));
        transform.apply_key(KeyCode::Named(NamedKey::Up));
        transform.apply_key(KeyCode::Named(NamedKey::Up));
        assert!((transform.translation - Vec3::new(0.1, 0.2, 0.0)).length() < TOLERANCE);
    }

    #[test]
    fn matrix_scales_then_translates() {
        let transform = ModelTransform {
            spin: None,
            translation: Vec3::new(1.0, 0.0, 0.0),
            scale: 2.0,
        };
        let moved = transform.matrix(0.0).transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((moved - Vec3::new(3.0, 0.0, 0.0)).length() < TOLERANCE);
    }

    #[test]
    fn spin_rotates_about_the_selected_axis() {
        let transform = ModelTransform {
            spin: Some(SpinAxis::Y),
            translation: Vec3::ZERO,
            scale: 1.0,
        };
        let moved = transform
            .matrix(std::f32::consts::FRAC_PI_2)
            .transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((moved - Vec3::new(0.0, 0.0, -1.0)).length() < TOLERANCE);
    }

    #[test]
    fn movement_keys_do_not_disturb_the_transform() {
        let mut transform = ModelTransform::default();
        transform.apply_key(KeyCode::character('w'));
        assert_eq!(transform, ModelTransform::default());
    }
}
