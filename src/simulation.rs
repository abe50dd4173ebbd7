// Owned animation state: the particle collection plus the two free-running
// scalars that drive it. One `step` per display frame.

use crate::particle::{Particle, ParticleKind};
use crate::pointer::Pointer;
use crate::snowman;
use rand::Rng;

pub struct Simulation {
    particles: Vec<Particle>,
    rotation: f64,
    rotation_direction: f64,
    arm_phase: f64,
    pointer: Pointer,
}

impl Simulation {
    pub const ROTATION_SPEED: f64 = 0.008;
    pub const ARM_SPEED: f64 = 0.03;
    // World units to pixels, before perspective.
    pub const SCALE: f64 = 1.5;

    pub fn new(particles: Vec<Particle>) -> Self {
        Simulation {
            particles,
            rotation: 0.0,
            rotation_direction: 1.0,
            arm_phase: 0.0,
            pointer: Pointer::new(),
        }
    }

    pub fn snowman() -> Self {
        Simulation::with_rng(&mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Simulation::new(snowman::build(rng))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[doc(hidden)]
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn rotation_direction(&self) -> f64 {
        self.rotation_direction
    }

    pub fn arm_phase(&self) -> f64 {
        self.arm_phase
    }

    #[doc(hidden)]
    pub fn set_arm_phase(&mut self, arm_phase: f64) {
        self.arm_phase = arm_phase;
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    // Whether any nose point would face the viewer at the current rotation.
    // Evaluated from rest poses so a nose still springing into place counts.
    pub fn nose_in_view(&self) -> bool {
        self.particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Nose)
            .any(|p| p.rotated_depth(self.rotation) > 0.0)
    }

    fn has_nose(&self) -> bool {
        self.particles.iter().any(|p| p.kind == ParticleKind::Nose)
    }

    pub fn step(&mut self) {
        self.arm_phase += Simulation::ARM_SPEED;

        if self.has_nose() && !self.nose_in_view() {
            self.rotation_direction = -self.rotation_direction;
            log::debug!(
                "nose turned away at rotation {:.3}, reversing to {}",
                self.rotation,
                self.rotation_direction
            );
        }
        self.rotation += Simulation::ROTATION_SPEED * self.rotation_direction;

        let (rotation, arm_phase) = (self.rotation, self.arm_phase);
        for particle in &mut self.particles {
            particle.recompute_target(rotation, arm_phase);
            particle.integrate();
        }
    }

    // Stable back-to-front order for the painter's algorithm
    pub fn sort_by_depth(&mut self) {
        self.particles.sort_by(|a, b| {
            a.depth_key()
                .partial_cmp(&b.depth_key())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, width: f64, height: f64) -> usize {
        self.pointer.move_to(x, y);
        let pushed = self
            .pointer
            .repel(&mut self.particles, Simulation::SCALE, width, height);
        if pushed > 0 {
            log::trace!("pointer at ({}, {}) pushed {} particles", x, y, pushed);
        }
        pushed
    }

    pub fn pointer_left(&mut self) {
        self.pointer.leave();
    }
}
