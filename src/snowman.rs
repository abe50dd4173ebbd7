// Assembles the snowman out of generator calls. Screen y grows downward, so
// the bottom ball sits at +y and the hat at -y; +z faces the viewer.

use crate::color::Color;
use crate::particle::{ArmSide, Particle, ParticleKind};
use crate::shapes::{self, Brush, Orientation};
use rand::Rng;

const SNOW_DENSITY: f64 = 2.5;
const COAL_DENSITY: f64 = 4.0;

pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Vec<Particle> {
    let mut particles = Vec::new();
    let snow = Brush::new(Color::from_hex("#fff"), SNOW_DENSITY);
    let coal = Brush::new(Color::from_hex("#222"), COAL_DENSITY);

    let mut body = 0;
    body += shapes::sphere(rng, &mut particles, glm::vec3(0.0, 120.0, 0.0), 70.0, snow, ParticleKind::Body);
    body += shapes::sphere(rng, &mut particles, glm::vec3(0.0, 20.0, 0.0), 55.0, snow, ParticleKind::Body);
    body += shapes::sphere(rng, &mut particles, glm::vec3(0.0, -60.0, 0.0), 40.0, snow, ParticleKind::Body);

    let mut coal_count = 0;
    for eye_x in [-14.0, 14.0].iter() {
        coal_count += shapes::sphere(rng, &mut particles, glm::vec3(*eye_x, -72.0, 37.0), 5.0, coal, ParticleKind::Body);
    }
    for (button_y, button_z) in [(0.0, 53.0), (20.0, 57.0), (40.0, 53.0)].iter() {
        coal_count += shapes::sphere(
            rng,
            &mut particles,
            glm::vec3(0.0, *button_y, *button_z),
            5.0,
            coal,
            ParticleKind::Body,
        );
    }

    let nose = shapes::cone(
        rng,
        &mut particles,
        glm::vec3(0.0, -55.0, 40.0),
        8.0,
        25.0,
        Brush::new(Color::from_hex("#ff6600"), SNOW_DENSITY),
        ParticleKind::Nose,
        Orientation::Horizontal,
    );

    let felt = Brush::new(Color::from_hex("#1a1a1a"), 1.5);
    let mut hat = 0;
    hat += shapes::cylinder(rng, &mut particles, glm::vec3(0.0, -104.0, 0.0), 50.0, 6.0, felt, ParticleKind::Hat);
    hat += shapes::cylinder(rng, &mut particles, glm::vec3(0.0, -150.0, 0.0), 32.0, 48.0, felt, ParticleKind::Hat);

    let scarf = shapes::scarf(
        rng,
        &mut particles,
        glm::vec3(0.0, -22.0, 0.0),
        38.0,
        7.0,
        Brush::new(Color::from_hex("#c0392b"), SNOW_DENSITY),
    );

    let bark = Brush::new(Color::from_hex("#5d4037"), SNOW_DENSITY);
    let mut arms = 0;
    arms += shapes::arm(rng, &mut particles, glm::vec3(-48.0, 10.0, 0.0), ArmSide::Left, 70.0, 4.0, bark);
    arms += shapes::arm(rng, &mut particles, glm::vec3(48.0, 10.0, 0.0), ArmSide::Right, 70.0, 4.0, bark);

    log::info!(
        "snowman assembled: {} particles (body {}, coal {}, nose {}, hat {}, scarf {}, arms {})",
        particles.len(),
        body,
        coal_count,
        nose,
        hat,
        scarf,
        arms
    );
    particles
}
