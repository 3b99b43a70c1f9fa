//! Recycle-effect particles
//!
//! Purely cosmetic. Each cleared cell of a uniform line bursts into a few
//! particles that drift, shrink and fade over roughly one second of updates.

use crate::rng::RandomSource;
use crate::types::{Category, PARTICLES_PER_CELL};

/// Seconds advanced per `update` (one 60 Hz frame).
pub const PARTICLE_TIMESTEP: f32 = 0.016;

/// Size multiplier applied per update.
pub const PARTICLE_SIZE_DECAY: f32 = 0.98;

/// Particles at or below this size are removed.
pub const PARTICLE_MIN_SIZE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Board coordinates (cell units, y up)
    pub x: f32,
    pub y: f32,
    /// Cells per second
    pub vx: f32,
    pub vy: f32,
    /// Remaining life, starts at 1.0
    pub life: f32,
    pub size: f32,
    pub category: Category,
}

impl Particle {
    /// Advance one timestep. Returns false once the particle has expired.
    pub fn step(&mut self) -> bool {
        self.x += self.vx * PARTICLE_TIMESTEP;
        self.y += self.vy * PARTICLE_TIMESTEP;
        self.life -= PARTICLE_TIMESTEP;
        self.size *= PARTICLE_SIZE_DECAY;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0 && self.size > PARTICLE_MIN_SIZE
    }
}

/// Append the burst for the cell at `(x, y)`.
///
/// Per particle the source is drawn three times: vx, vy (in -1.0..1.0) and size (0.10..0.29).
pub fn create_recycle_effect<R: RandomSource>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    x: i8,
    y: i8,
    category: Category,
) {
    for _ in 0..PARTICLES_PER_CELL {
        let vx = (rng.next_range(200) as f32 - 100.0) / 100.0;
        let vy = (rng.next_range(200) as f32 - 100.0) / 100.0;
        let size = 0.1 + rng.next_range(20) as f32 / 100.0;
        particles.push(Particle {
            x: f32::from(x) + 0.5,
            y: f32::from(y) + 0.5,
            vx,
            vy,
            life: 1.0,
            size,
            category,
        });
    }
}

/// Step every particle and drop the expired ones.
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(Particle::step);
}
