// Volumetric point-cloud generators. Every function appends freshly built
// particles to `out` and returns how many it added. Degenerate sizes
// (zero, negative or non-finite) add nothing.

use crate::color::Color;
use crate::particle::{ArmSide, Particle, ParticleKind};
use glm::DVec3;
use rand::Rng;
use std::f64::consts::TAU;

// Appearance shared by every point of one generator call.
#[derive(Copy, Clone, Debug)]
pub struct Brush {
    pub color: Color,
    pub density: f64,
}

impl Brush {
    pub fn new(color: Color, density: f64) -> Self {
        Brush { color, density }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    // Apex points up the screen (toward -y).
    Vertical,
    // Apex points toward the viewer (+z).
    Horizontal,
}

fn sample_count(dimensions: &[f64], product: f64) -> usize {
    let valid = dimensions.iter().all(|d| d.is_finite() && *d > 0.0);
    if valid && product.is_finite() && product >= 1.0 {
        product.floor() as usize
    } else {
        0
    }
}

// Uniform point inside a disk of `radius`; sqrt keeps area density flat
fn random_in_disk<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> (f64, f64) {
    let angle = rng.gen::<f64>() * TAU;
    let r = radius * rng.gen::<f64>().sqrt();
    (r * angle.cos(), r * angle.sin())
}

pub fn sphere<R: Rng + ?Sized>(
    rng: &mut R,
    out: &mut Vec<Particle>,
    center: DVec3,
    radius: f64,
    brush: Brush,
    kind: ParticleKind,
) -> usize {
    let count = sample_count(&[radius, brush.density], radius * radius * brush.density);
    out.reserve(count);
    for _ in 0..count {
        let theta = rng.gen::<f64>() * TAU;
        let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();
        // Cube root for uniform volume distribution
        let r = radius * rng.gen::<f64>().cbrt();

        let offset = glm::vec3(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        );
        out.push(Particle::new(center + offset, brush.color, kind));
    }
    count
}

pub fn cone<R: Rng + ?Sized>(
    rng: &mut R,
    out: &mut Vec<Particle>,
    center: DVec3,
    radius: f64,
    height: f64,
    brush: Brush,
    kind: ParticleKind,
    orientation: Orientation,
) -> usize {
    let count = sample_count(
        &[radius, height, brush.density],
        radius * height * brush.density,
    );
    out.reserve(count);
    for _ in 0..count {
        let t = rng.gen::<f64>();
        let angle = rng.gen::<f64>() * TAU;
        // Linear taper from base to apex
        let r = radius * (1.0 - t) * rng.gen::<f64>().sqrt();

        let offset = match orientation {
            Orientation::Vertical => glm::vec3(r * angle.cos(), -t * height, r * angle.sin()),
            Orientation::Horizontal => glm::vec3(r * angle.cos(), r * angle.sin(), t * height),
        };
        out.push(Particle::new(center + offset, brush.color, kind));
    }
    count
}

// Grows downward from `center` by `height`
pub fn cylinder<R: Rng + ?Sized>(
    rng: &mut R,
    out: &mut Vec<Particle>,
    center: DVec3,
    radius: f64,
    height: f64,
    brush: Brush,
    kind: ParticleKind,
) -> usize {
    let count = sample_count(
        &[radius, height, brush.density],
        radius * height * brush.density * 2.0,
    );
    out.reserve(count);
    for _ in 0..count {
        let (dx, dz) = random_in_disk(rng, radius);
        let h = rng.gen::<f64>() * height;
        out.push(Particle::new(
            center + glm::vec3(dx, h, dz),
            brush.color,
            kind,
        ));
    }
    count
}

// Torus-like band around `center` (in the horizontal plane) with a flap
// hanging down on the viewer's side.
pub fn scarf<R: Rng + ?Sized>(
    rng: &mut R,
    out: &mut Vec<Particle>,
    center: DVec3,
    ring_radius: f64,
    thickness: f64,
    brush: Brush,
) -> usize {
    let band_count = sample_count(
        &[ring_radius, thickness, brush.density],
        ring_radius * thickness * brush.density * 2.0,
    );
    for _ in 0..band_count {
        let around = rng.gen::<f64>() * TAU;
        let (radial, vertical) = random_in_disk(rng, thickness);
        let reach = ring_radius + radial;
        let offset = glm::vec3(reach * around.cos(), vertical, reach * around.sin());
        out.push(Particle::new(center + offset, brush.color, ParticleKind::Scarf));
    }

    // The flap leaves the band a little right of front and leans outward as it
    // drops so it stays clear of the body below.
    let anchor_angle = TAU / 4.0 - 0.4;
    let outward = glm::vec3(anchor_angle.cos(), 0.0, anchor_angle.sin());
    let tangent = glm::vec3(-anchor_angle.sin(), 0.0, anchor_angle.cos());
    let anchor = center + outward * ring_radius;
    let flap_length = thickness * 5.5;
    let flap_width = thickness * 1.6;
    let flap_count = sample_count(
        &[flap_length, flap_width, brush.density],
        flap_length * flap_width * brush.density * 0.5,
    );
    for _ in 0..flap_count {
        let s = rng.gen::<f64>();
        let across = (rng.gen::<f64>() - 0.5) * flap_width;
        let depth = (rng.gen::<f64>() - 0.5) * thickness * 0.4;
        let position = anchor
            + tangent * across
            + outward * (s * thickness * 2.8 + depth)
            + glm::vec3(0.0, s * flap_length, 0.0);
        out.push(Particle::new(position, brush.color, ParticleKind::Scarf));
    }

    band_count + flap_count
}

// A tapering stick from `shoulder` out to one side, ending in three splayed
// fingers. Branch points carry their fraction along the arm; finger points
// sway with the tip.
pub fn arm<R: Rng + ?Sized>(
    rng: &mut R,
    out: &mut Vec<Particle>,
    shoulder: DVec3,
    side: ArmSide,
    length: f64,
    thickness: f64,
    brush: Brush,
) -> usize {
    let outward = match side {
        ArmSide::Left => -1.0,
        ArmSide::Right => 1.0,
    };
    let dir = glm::normalize(&glm::vec3(outward, -0.55, 0.15));
    let across = glm::normalize(&glm::cross(&dir, &glm::vec3(0.0, 1.0, 0.0)));
    let up = glm::cross(&dir, &across);

    let mut count = 0;
    let branch_count = sample_count(
        &[length, thickness, brush.density],
        length * thickness * brush.density,
    );
    for _ in 0..branch_count {
        let t = rng.gen::<f64>();
        let (a, b) = random_in_disk(rng, thickness * (1.0 - 0.55 * t));
        let position = shoulder + dir * (t * length) + across * a + up * b;
        out.push(Particle::new(position, brush.color, ParticleKind::arm(side, t)));
    }
    count += branch_count;

    let tip = shoulder + dir * length;
    let finger_length = length * 0.28;
    let finger_thickness = thickness * 0.45;
    for splay in [-0.6f64, 0.0, 0.6].iter() {
        let finger_dir = dir * splay.cos() + up * splay.sin();
        let finger_count = sample_count(
            &[finger_length, finger_thickness, brush.density],
            finger_length * finger_thickness * brush.density,
        );
        for _ in 0..finger_count {
            let t = rng.gen::<f64>();
            let (a, b) = random_in_disk(rng, finger_thickness * (1.0 - 0.5 * t));
            let position = tip + finger_dir * (t * finger_length) + across * a + up * b;
            out.push(Particle::new(position, brush.color, ParticleKind::arm(side, 1.0)));
        }
        count += finger_count;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f64 = 1e-9;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn brush(density: f64) -> Brush {
        Brush::new(Color::WHITE, density)
    }

    #[test]
    fn sphere_count_and_bounds() {
        let mut out = Vec::new();
        let center = glm::vec3(5.0, -3.0, 2.0);
        let added = sphere(&mut rng(), &mut out, center, 10.0, brush(1.0), ParticleKind::Body);
        assert_eq!(added, 100);
        assert_eq!(out.len(), 100);
        for p in &out {
            assert_eq!(p.kind, ParticleKind::Body);
            assert!(glm::distance(p.base(), &center) <= 10.0 + EPSILON);
            assert_eq!(p.pos, *p.base());
        }
    }

    #[test]
    fn sphere_count_floors() {
        let mut out = Vec::new();
        let added = sphere(&mut rng(), &mut out, DVec3::zeros(), 7.0, brush(2.5), ParticleKind::Hat);
        assert_eq!(added, 122);
    }

    #[test]
    fn sphere_fills_the_volume() {
        // Half the volume of a ball lies beyond 0.7937 of its radius
        let mut out = Vec::new();
        sphere(&mut rng(), &mut out, DVec3::zeros(), 40.0, brush(2.5), ParticleKind::Body);
        let outer = out
            .iter()
            .filter(|p| glm::length(p.base()) > 40.0 * 0.5f64.cbrt())
            .count();
        let share = outer as f64 / out.len() as f64;
        assert!((share - 0.5).abs() < 0.05, "outer share {}", share);

        let in_front = out.iter().filter(|p| p.base().z > 0.0).count();
        let share = in_front as f64 / out.len() as f64;
        assert!((share - 0.5).abs() < 0.05, "front share {}", share);
    }

    #[test]
    fn degenerate_sizes_produce_nothing() {
        let mut out = Vec::new();
        let mut rng = rng();
        let center = DVec3::zeros();
        assert_eq!(sphere(&mut rng, &mut out, center, -10.0, brush(1.0), ParticleKind::Body), 0);
        assert_eq!(sphere(&mut rng, &mut out, center, 10.0, brush(0.0), ParticleKind::Body), 0);
        assert_eq!(sphere(&mut rng, &mut out, center, 0.5, brush(1.0), ParticleKind::Body), 0);
        assert_eq!(
            cone(&mut rng, &mut out, center, 8.0, -1.0, brush(1.0), ParticleKind::Nose, Orientation::Vertical),
            0
        );
        assert_eq!(cylinder(&mut rng, &mut out, center, 0.0, 5.0, brush(1.0), ParticleKind::Hat), 0);
        assert_eq!(cylinder(&mut rng, &mut out, center, f64::NAN, 5.0, brush(1.0), ParticleKind::Hat), 0);
        assert_eq!(scarf(&mut rng, &mut out, center, 30.0, 0.0, brush(1.0)), 0);
        assert_eq!(arm(&mut rng, &mut out, center, ArmSide::Left, 0.0, 4.0, brush(1.0)), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn vertical_cone_tapers_to_apex() {
        let mut out = Vec::new();
        let center = glm::vec3(0.0, 50.0, 0.0);
        let added = cone(
            &mut rng(),
            &mut out,
            center,
            10.0,
            30.0,
            brush(2.0),
            ParticleKind::Hat,
            Orientation::Vertical,
        );
        assert_eq!(added, 600);
        for p in &out {
            let rise = center.y - p.base().y;
            assert!(rise >= 0.0 && rise <= 30.0);
            let t = rise / 30.0;
            let radial = (p.base().x.powi(2) + p.base().z.powi(2)).sqrt();
            assert!(radial <= 10.0 * (1.0 - t) + EPSILON);
        }
    }

    #[test]
    fn horizontal_cone_points_at_viewer() {
        let mut out = Vec::new();
        let center = glm::vec3(0.0, -55.0, 40.0);
        cone(
            &mut rng(),
            &mut out,
            center,
            8.0,
            25.0,
            brush(2.5),
            ParticleKind::Nose,
            Orientation::Horizontal,
        );
        assert_eq!(out.len(), 500);
        for p in &out {
            let reach = p.base().z - center.z;
            assert!(reach >= 0.0 && reach <= 25.0);
            let t = reach / 25.0;
            let radial = ((p.base().x - center.x).powi(2) + (p.base().y - center.y).powi(2)).sqrt();
            assert!(radial <= 8.0 * (1.0 - t) + EPSILON);
            assert_eq!(p.kind, ParticleKind::Nose);
        }
    }

    #[test]
    fn cylinder_hangs_below_center() {
        let mut out = Vec::new();
        let center = glm::vec3(0.0, -150.0, 0.0);
        let added = cylinder(&mut rng(), &mut out, center, 32.0, 48.0, brush(1.0), ParticleKind::Hat);
        assert_eq!(added, 3072);
        for p in &out {
            let drop = p.base().y - center.y;
            assert!(drop >= 0.0 && drop <= 48.0);
            assert!((p.base().x.powi(2) + p.base().z.powi(2)).sqrt() <= 32.0 + EPSILON);
        }
    }

    #[test]
    fn cylinder_passes_arm_tags_through() {
        let mut out = Vec::new();
        let kind = ParticleKind::arm(ArmSide::Right, 0.25);
        cylinder(&mut rng(), &mut out, DVec3::zeros(), 3.0, 10.0, brush(1.0), kind);
        assert_eq!(out.len(), 60);
        assert!(out.iter().all(|p| p.kind == kind));
    }

    #[test]
    fn scarf_wraps_the_neck() {
        let mut out = Vec::new();
        let center = glm::vec3(0.0, -22.0, 0.0);
        let added = scarf(&mut rng(), &mut out, center, 38.0, 7.0, brush(2.5));
        assert_eq!(added, out.len());
        assert!(added > 0);
        assert!(out.iter().all(|p| p.kind == ParticleKind::Scarf));

        // Nothing falls inside the neck hole
        for p in &out {
            let radial = ((p.base().x - center.x).powi(2) + (p.base().z - center.z).powi(2)).sqrt();
            assert!(radial >= 38.0 - 7.0 - EPSILON);
            assert!(p.base().y >= center.y - 7.0 - EPSILON);
        }
        // The flap reaches well below the band
        assert!(out.iter().any(|p| p.base().y > center.y + 20.0));
    }

    #[test]
    fn arms_sway_more_toward_the_tip() {
        let mut out = Vec::new();
        let shoulder = glm::vec3(-48.0, 0.0, 0.0);
        let added = arm(&mut rng(), &mut out, shoulder, ArmSide::Left, 70.0, 4.0, brush(2.5));
        assert_eq!(added, out.len());

        let mut fingers = 0;
        for p in &out {
            match p.kind {
                ParticleKind::Arm { side, distance } => {
                    assert_eq!(side, ArmSide::Left);
                    assert!(distance >= 0.0 && distance <= 1.0);
                    if distance == 1.0 {
                        fingers += 1;
                    }
                }
                other => panic!("unexpected kind {:?}", other),
            }
            // Left arm reaches out to the viewer's left
            assert!(p.base().x <= shoulder.x + 4.0);
        }
        assert!(fingers > 0);
    }

    #[test]
    fn right_arm_mirrors_left() {
        let mut out = Vec::new();
        let shoulder = glm::vec3(48.0, 0.0, 0.0);
        arm(&mut rng(), &mut out, shoulder, ArmSide::Right, 70.0, 4.0, brush(2.5));
        let reach = out.iter().map(|p| p.base().x).fold(f64::MIN, f64::max);
        assert!(reach > shoulder.x + 50.0);
    }
}
