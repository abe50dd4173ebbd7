// A single point of the figure. Keeps its rest pose, the position its spring
// pulls toward this frame, and its current position and velocity.

use crate::color::Color;
use glm::DVec3;
use std::f64::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArmSide {
    Left,
    Right,
}

impl ArmSide {
    // Arms swing in opposition
    pub fn phase_shift(self) -> f64 {
        match self {
            ArmSide::Left => 0.0,
            ArmSide::Right => PI,
        }
    }
}

// What part of the figure a particle belongs to. Decides visibility and
// whether the particle sways with the arm animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ParticleKind {
    Body,
    Nose,
    Hat,
    Scarf,
    // `distance` is the fraction of the way from shoulder (0) to fingertip (1).
    Arm { side: ArmSide, distance: f64 },
}

impl ParticleKind {
    pub fn arm(side: ArmSide, distance: f64) -> ParticleKind {
        ParticleKind::Arm {
            side,
            distance: distance.max(0.0).min(1.0),
        }
    }
}

// Screen-space placement of a particle for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Clone, Debug)]
pub struct Particle {
    base: DVec3,
    pub pos: DVec3,
    pub target: DVec3,
    pub vel: DVec3,
    pub color: Color,
    pub kind: ParticleKind,
}

impl Particle {
    pub const RETURN_SPEED: f64 = 0.08;
    pub const DAMPING: f64 = 0.85;
    pub const FOCAL_LENGTH: f64 = 600.0;
    pub const SIZE: f64 = 1.8;
    pub const MIN_SIZE: f64 = 0.5;
    pub const ARM_SWAY: f64 = 20.0;

    pub fn new(base: DVec3, color: Color, kind: ParticleKind) -> Particle {
        Particle {
            base,
            pos: base,
            target: base,
            vel: DVec3::zeros(),
            color,
            kind,
        }
    }

    pub fn base(&self) -> &DVec3 {
        &self.base
    }

    // Turn the rest pose about the vertical axis and add the arm sway
    pub fn recompute_target(&mut self, rotation: f64, arm_phase: f64) {
        let (sin_a, cos_a) = rotation.sin_cos();
        self.target.x = self.base.x * cos_a - self.base.z * sin_a;
        self.target.z = self.base.x * sin_a + self.base.z * cos_a;
        self.target.y = match self.kind {
            ParticleKind::Arm { side, distance } => {
                self.base.y + (arm_phase + side.phase_shift()).sin() * Particle::ARM_SWAY * distance
            }
            _ => self.base.y,
        };
    }

    pub fn integrate(&mut self) {
        self.vel += (self.target - self.pos) * Particle::RETURN_SPEED;
        self.vel *= Particle::DAMPING;
        self.pos += self.vel;
    }

    // Depth the rest pose would have at `rotation`, without touching any state
    pub fn rotated_depth(&self, rotation: f64) -> f64 {
        let (sin_a, cos_a) = rotation.sin_cos();
        self.base.x * sin_a + self.base.z * cos_a
    }

    // The nose hides once it turns away from the viewer
    pub fn is_visible(&self) -> bool {
        match self.kind {
            ParticleKind::Nose => self.pos.z > 0.0,
            _ => true,
        }
    }

    pub fn project(&self, scale: f64, width: f64, height: f64) -> Projection {
        let proj_scale = Particle::FOCAL_LENGTH / (Particle::FOCAL_LENGTH + self.pos.z);
        Projection {
            x: width / 2.0 + self.pos.x * scale * proj_scale,
            y: height / 2.0 + self.pos.y * scale * proj_scale,
            radius: (proj_scale * Particle::SIZE).max(Particle::MIN_SIZE),
        }
    }

    pub fn depth_key(&self) -> f64 {
        self.pos.z
    }
}
