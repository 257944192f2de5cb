//! Decorative particle field behind the product viewer.
//!
//! Pure simulation state: the host renders it and drives [`ParticleField::tick`]
//! from its frame callback. Motion combines autonomous drift, attraction
//! toward the pointer, velocity damping, and soft boundary bounces.

use rand::Rng;
use serde::Serialize;

use solstice_core::ColorHex;

/// Number of particles in the field.
pub const PARTICLE_COUNT: usize = 80;

/// Pointer attraction radius in field units (pixels on the host canvas).
const ATTRACTION_RADIUS: f32 = 250.0;

/// Attraction strength at zero distance.
const ATTRACTION_STRENGTH: f32 = 0.10;

/// Per-frame velocity damping factor.
const DAMPING: f32 = 0.96;

/// Velocity reflection factor on boundary contact.
const BOUNCE: f32 = -0.8;

/// Reference frame rate the per-frame constants are tuned against.
const REFERENCE_FPS: f32 = 60.0;

/// Particle color palette: violet, cyan, pink, blue, amber, emerald.
const PALETTE: [(u8, u8, u8); 6] = [
    (0xa8, 0x55, 0xf7),
    (0x00, 0xd9, 0xff),
    (0xec, 0x48, 0x99),
    (0x3b, 0x82, 0xf6),
    (0xf5, 0x9e, 0x0b),
    (0x10, 0xb9, 0x81),
];

/// One particle.
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub base_size: f32,
    pub opacity: f32,
    pub color: ColorHex,
    pub pulse_speed: f32,
    pub angle: f32,
    pub rotation_speed: f32,
}

/// The particle field simulation.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    pointer: (f32, f32),
    time: f32,
}

impl ParticleField {
    /// Seed a field of [`PARTICLE_COUNT`] particles inside `width` x `height`.
    pub fn new(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                let base_size = rng.random_range(0.0..4.0) + 2.0;
                let (r, g, b) = PALETTE
                    .get(rng.random_range(0..PALETTE.len()))
                    .copied()
                    .unwrap_or((0xff, 0xff, 0xff));
                Particle {
                    x: rng.random_range(0.0..width),
                    y: rng.random_range(0.0..height),
                    vx: (rng.random_range(0.0..1.0) - 0.5) * 0.3,
                    vy: (rng.random_range(0.0..1.0) - 0.5) * 0.3,
                    size: base_size,
                    base_size,
                    opacity: rng.random_range(0.0..0.4) + 0.2,
                    color: ColorHex::from_rgb(r, g, b),
                    pulse_speed: rng.random_range(0.0..0.02) + 0.01,
                    angle: rng.random_range(0.0..std::f32::consts::TAU),
                    rotation_speed: (rng.random_range(0.0..1.0) - 0.5) * 0.01,
                }
            })
            .collect();

        Self {
            particles,
            width,
            height,
            pointer: (width / 2.0, height / 2.0),
            time: 0.0,
        }
    }

    /// Particles for rendering.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Move the attraction point (pointer position on the host canvas).
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        // Constants are tuned per 60fps frame; scale to the elapsed time.
        let frames = dt * REFERENCE_FPS;
        self.time += dt;
        let (px, py) = self.pointer;

        for (index, p) in self.particles.iter_mut().enumerate() {
            // Pointer attraction
            let dx = px - p.x;
            let dy = py - p.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > 0.0 && distance < ATTRACTION_RADIUS {
                let force = (ATTRACTION_RADIUS - distance) / ATTRACTION_RADIUS;
                p.vx += (dx / distance) * force * ATTRACTION_STRENGTH * frames;
                p.vy += (dy / distance) * force * ATTRACTION_STRENGTH * frames;
            }

            // Autonomous drift
            #[allow(clippy::cast_precision_loss)]
            let phase = self.time + index as f32;
            p.vx += phase.sin() * 0.005 * frames;
            p.vy += phase.cos() * 0.005 * frames;

            // Integrate and damp
            p.x += p.vx * frames;
            p.y += p.vy * frames;
            p.vx *= DAMPING.powf(frames);
            p.vy *= DAMPING.powf(frames);

            // Boundary bounce with clamp back into the field
            if p.x < 0.0 || p.x > self.width {
                p.vx *= BOUNCE;
                p.x = p.x.clamp(0.0, self.width);
            }
            if p.y < 0.0 || p.y > self.height {
                p.vy *= BOUNCE;
                p.y = p.y.clamp(0.0, self.height);
            }

            // Size pulse and slow rotation
            #[allow(clippy::cast_precision_loss)]
            let pulse_phase = self.time * 2.0 + index as f32;
            p.size = p.base_size + pulse_phase.sin() * p.base_size * 0.3;
            p.angle += p.rotation_speed * frames;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field() -> ParticleField {
        let mut rng = StdRng::seed_from_u64(7);
        ParticleField::new(800.0, 600.0, &mut rng)
    }

    #[test]
    fn test_new_seeds_full_field() {
        let field = field();
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        for p in field.particles() {
            assert!((0.0..=800.0).contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
            assert!(p.base_size >= 2.0);
            assert!(p.opacity >= 0.2);
        }
    }

    #[test]
    fn test_tick_moves_particles() {
        let mut field = field();
        let before: Vec<(f32, f32)> = field.particles().iter().map(|p| (p.x, p.y)).collect();

        field.tick(1.0 / 60.0);

        let moved = field
            .particles()
            .iter()
            .zip(&before)
            .filter(|(p, (x, y))| (p.x - x).abs() > f32::EPSILON || (p.y - y).abs() > f32::EPSILON)
            .count();
        assert!(moved > 0);
    }

    #[test]
    fn test_particles_stay_in_bounds() {
        let mut field = field();
        for _ in 0..600 {
            field.tick(1.0 / 60.0);
        }
        for p in field.particles() {
            assert!((0.0..=800.0).contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
        }
    }

    #[test]
    fn test_pointer_attracts_nearby_particles() {
        let mut field = field();
        field.set_pointer(400.0, 300.0);
        for _ in 0..120 {
            field.tick(1.0 / 60.0);
        }

        // Mean distance to the pointer shrinks under sustained attraction
        let mean_distance = |f: &ParticleField| {
            f.particles()
                .iter()
                .map(|p| ((p.x - 400.0).powi(2) + (p.y - 300.0).powi(2)).sqrt())
                .sum::<f32>()
                / PARTICLE_COUNT as f32
        };

        let settled = mean_distance(&field);
        let fresh = mean_distance(&self::field());
        assert!(settled < fresh);
    }

    #[test]
    fn test_zero_dt_is_a_no_op_for_position() {
        let mut field = field();
        let before: Vec<(f32, f32)> = field.particles().iter().map(|p| (p.x, p.y)).collect();
        field.tick(0.0);
        for (p, (x, y)) in field.particles().iter().zip(&before) {
            assert!((p.x - x).abs() < f32::EPSILON);
            assert!((p.y - y).abs() < f32::EPSILON);
        }
    }
}
