// Cursor bookkeeping and the screen-space push it gives nearby particles.
// The push only changes velocity, so each particle springs back to its
// target afterwards.

use crate::particle::Particle;
use vecmath::Vector2;

#[derive(Default, Debug, Clone)]
pub struct Pointer {
    pos: Option<[f64; 2]>,
}

impl Pointer {
    pub const RADIUS: f64 = 40.0;
    pub const FORCE: f64 = 2.0;

    pub fn new() -> Self {
        Pointer { pos: None }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = Some([x, y]);
    }

    pub fn leave(&mut self) {
        self.pos = None;
    }

    pub fn pos(&self) -> Option<[f64; 2]> {
        self.pos
    }

    pub fn is_inside(&self) -> bool {
        self.pos.is_some()
    }

    // Impulse for something drawn at `screen_pos`, or None when it's out of reach
    pub fn impulse_at(&self, screen_pos: Vector2<f64>) -> Option<Vector2<f64>> {
        let pointer = self.pos?;
        let away = vecmath::vec2_sub(screen_pos, pointer);
        let distance = vecmath::vec2_len(away);
        if distance >= Pointer::RADIUS {
            return None;
        }

        let strength = (Pointer::RADIUS - distance) / Pointer::RADIUS * Pointer::FORCE;
        // Dead centre has no direction of its own, push it straight up
        let dir = if distance > 0.0 {
            vecmath::vec2_scale(away, 1.0 / distance)
        } else {
            [0.0, -1.0]
        };
        Some(vecmath::vec2_scale(dir, strength))
    }

    // Returns how many particles were pushed
    pub fn repel(&self, particles: &mut [Particle], scale: f64, width: f64, height: f64) -> usize {
        if self.pos.is_none() {
            return 0;
        }
        let mut pushed = 0;
        for particle in particles.iter_mut() {
            let proj = particle.project(scale, width, height);
            if let Some(impulse) = self.impulse_at([proj.x, proj.y]) {
                particle.vel.x += impulse[0];
                particle.vel.y += impulse[1];
                pushed += 1;
            }
        }
        pushed
    }
}
