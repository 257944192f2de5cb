//! 3D product viewer configuration.
//!
//! # Architecture
//!
//! The storefront owns viewer *state*, not rendering: scene descriptions
//! ([`scene`]), the decorative particle field ([`particles`]), and upload
//! validation ([`upload`]). The client engine renders the description and
//! drives the per-frame update through [`Viewer::tick`].
//!
//! The tick is an explicit function with an explicit lifecycle: hosts call
//! [`Viewer::mount`] when the view appears and [`Viewer::unmount`] when it
//! goes away, and `tick` does nothing while unmounted. There is no hidden
//! callback registration to leak.

pub mod particles;
pub mod scene;
pub mod upload;

pub use particles::ParticleField;
pub use scene::Scene;
pub use upload::{UploadError, ValidatedModel};

use rand::Rng;

use solstice_core::ColorHex;

/// Auto-rotation applied to the product, in radians per frame at 60fps.
const ROTATION_PER_FRAME: f32 = 0.003;

/// Interactive viewer state for one product view.
pub struct Viewer {
    scene: Scene,
    particles: ParticleField,
    rotation_y: f32,
    hovered: bool,
    mounted: bool,
}

impl Viewer {
    /// Create a viewer around the placeholder mesh in `tint`.
    ///
    /// `width`/`height` size the particle field to the host canvas.
    pub fn new(tint: ColorHex, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Self {
            scene: Scene::with_placeholder(tint),
            particles: ParticleField::new(width, height, rng),
            rotation_y: 0.0,
            hovered: false,
            mounted: false,
        }
    }

    /// The current scene description.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The particle field.
    #[must_use]
    pub const fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Current product rotation around the vertical axis, in radians.
    #[must_use]
    pub const fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Start the per-frame loop: after this, `tick` advances the view.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Tear the loop down; subsequent `tick` calls are no-ops.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Whether the viewer is currently mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Pointer entered or left the product (hover pauses auto-rotation).
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Pointer moved on the host canvas (attracts particles).
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.particles.set_pointer(x, y);
    }

    /// Re-apply a chosen color to the active mesh, in place.
    pub fn set_tint(&mut self, tint: ColorHex) {
        self.scene.set_tint(tint);
    }

    /// Swap the placeholder for an uploaded model, keeping the current tint.
    ///
    /// Callers validate the upload first ([`upload::validate`]); a rejected
    /// file never reaches this point, so the previous model stays active.
    pub fn set_model(&mut self, url: String) {
        self.scene = Scene::with_model(url, self.scene.tint.clone());
    }

    /// Advance the view by `dt` seconds.
    ///
    /// Rotates the product (unless hovered) and steps the particle field.
    /// Does nothing while unmounted.
    pub fn tick(&mut self, dt: f32) {
        if !self.mounted {
            return;
        }

        if !self.hovered {
            self.rotation_y += ROTATION_PER_FRAME * dt * 60.0;
        }
        self.particles.tick(dt);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn viewer() -> Viewer {
        let mut rng = StdRng::seed_from_u64(42);
        let tint = ColorHex::parse("#a855f7").unwrap();
        Viewer::new(tint, 800.0, 600.0, &mut rng)
    }

    #[test]
    fn test_tick_is_noop_until_mounted() {
        let mut v = viewer();
        v.tick(1.0 / 60.0);
        assert!((v.rotation_y() - 0.0).abs() < f32::EPSILON);

        v.mount();
        v.tick(1.0 / 60.0);
        assert!(v.rotation_y() > 0.0);
    }

    #[test]
    fn test_unmount_stops_the_loop() {
        let mut v = viewer();
        v.mount();
        v.tick(1.0 / 60.0);
        let rotation = v.rotation_y();

        v.unmount();
        v.tick(1.0 / 60.0);
        assert!((v.rotation_y() - rotation).abs() < f32::EPSILON);
        assert!(!v.is_mounted());
    }

    #[test]
    fn test_hover_pauses_rotation_but_not_particles() {
        let mut v = viewer();
        v.mount();
        v.set_hovered(true);

        let before: Vec<f32> = v.particles().particles().iter().map(|p| p.x).collect();
        v.tick(1.0 / 60.0);

        assert!((v.rotation_y() - 0.0).abs() < f32::EPSILON);
        let after: Vec<f32> = v.particles().particles().iter().map(|p| p.x).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_rotation_rate_matches_reference_frame() {
        let mut v = viewer();
        v.mount();
        v.tick(1.0 / 60.0);
        assert!((v.rotation_y() - ROTATION_PER_FRAME).abs() < 1e-6);
    }

    #[test]
    fn test_set_model_keeps_tint() {
        let mut v = viewer();
        let tint = ColorHex::parse("#22c55e").unwrap();
        v.set_tint(tint.clone());
        v.set_model("/models/custom.glb".to_string());
        assert_eq!(v.scene().tint, tint);
    }

    #[test]
    fn test_tint_survives_across_ticks() {
        // Recoloring mutates materials in place; ticking afterwards must
        // not reset them.
        let mut v = viewer();
        v.mount();
        let tint = ColorHex::parse("#ff006e").unwrap();
        v.set_tint(tint.clone());
        for _ in 0..10 {
            v.tick(1.0 / 60.0);
        }
        for material in v.scene().materials() {
            if material.tintable {
                assert_eq!(material.color, tint);
            }
        }
    }
}
