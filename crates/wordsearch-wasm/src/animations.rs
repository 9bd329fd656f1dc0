//! Finale animation: hearts drifting over the closing lines

use crate::theme::Color;

/// Simple PRNG for animations
struct AnimRng {
    state: u64,
}

impl AnimRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) ^ self.state) as u32
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }

    fn gen_range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    fn gen_range_usize(&mut self, min: usize, max: usize) -> usize {
        min + (self.next_u32() as usize % (max - min))
    }
}

/// A single drifting heart
#[derive(Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub char: char,
    pub color: Color,
    pub lifetime: f32,
    pub size: f32,
}

impl Particle {
    pub fn is_visible(&self, width: f32, height: f32) -> bool {
        self.x >= -10.0
            && self.x < width + 10.0
            && self.y >= -10.0
            && self.y < height + 10.0
            && self.lifetime > 0.0
    }
}

const HEART_CHARS: &[char] = &['♥', '♡', '❀', '✿', '✦', '*'];

const ROSE_COLORS: &[Color] = &[
    Color::new(244, 63, 94),
    Color::new(251, 113, 133),
    Color::new(253, 164, 175),
    Color::new(225, 29, 72),
    Color::new(255, 228, 235),
];

/// The animated finale overlay
pub struct FinaleScreen {
    particles: Vec<Particle>,
    frame_count: u32,
    pub width: f32,
    pub height: f32,
    rng: AnimRng,
}

impl FinaleScreen {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            frame_count: 0,
            width: 1000.0,
            height: 700.0,
            rng: AnimRng::new(seed),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        self.frame_count += 1;

        // Hearts drift down with a gentle sideways sway
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vx += (p.y * 0.02).sin() * 0.03;
            p.lifetime -= 0.016;
            p.is_visible(self.width, self.height)
        });

        self.spawn_hearts();
    }

    fn spawn_hearts(&mut self) {
        for _ in 0..2 {
            let char_idx = self.rng.gen_range_usize(0, HEART_CHARS.len());
            let color_idx = self.rng.gen_range_usize(0, ROSE_COLORS.len());
            self.particles.push(Particle {
                x: self.rng.gen_range_f32(0.0, self.width),
                y: -10.0,
                vx: self.rng.gen_range_f32(-0.6, 0.6),
                vy: self.rng.gen_range_f32(0.8, 2.2),
                char: HEART_CHARS[char_idx],
                color: ROSE_COLORS[color_idx],
                lifetime: self.rng.gen_range_f32(4.0, 8.0),
                size: self.rng.gen_range_f32(14.0, 30.0),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Slow 0..1 throb for the sign-off line
    pub fn pulse(&self) -> f32 {
        (self.frame_count as f32 * 0.05).sin() * 0.5 + 0.5
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}
