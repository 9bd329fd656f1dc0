use crossterm::style::Color;
use rand::prelude::SliceRandom;
use rand::Rng;

/// A single drifting heart in the finale
#[derive(Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub char: char,
    pub color: Color,
    pub lifetime: f32,
}

impl Particle {
    pub fn is_visible(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0
            && self.x < width as f32
            && self.y >= 0.0
            && self.y < height as f32
            && self.lifetime > 0.0
    }
}

/// Heart characters
const HEART_CHARS: &[char] = &['♥', '♡', '❀', '✿', '✦', '*'];

/// Generate a random rose-tinted color
fn random_rose_color() -> Color {
    let mut rng = rand::thread_rng();
    match rng.gen_range(0..5) {
        0 => Color::Rgb { r: 244, g: 63, b: 94 },
        1 => Color::Rgb { r: 251, g: 113, b: 133 },
        2 => Color::Rgb { r: 253, g: 164, b: 175 },
        3 => Color::Rgb { r: 225, g: 29, b: 72 },
        _ => Color::Rgb { r: 255, g: 228, b: 235 },
    }
}

/// The animated finale screen: hearts drifting down over the closing lines
pub struct FinaleScreen {
    particles: Vec<Particle>,
    frame_count: u32,
    pub width: u16,
    pub height: u16,
}

impl FinaleScreen {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            frame_count: 0,
            width: 80,
            height: 24,
        }
    }

    pub fn reset(&mut self) {
        self.particles.clear();
        self.frame_count = 0;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        self.frame_count += 1;

        // Hearts drift, sway sideways, and fade out near the bottom
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vx += (p.y * 0.5).sin() * 0.01;
            p.lifetime -= 0.016;
            p.lifetime > 0.0 && p.y < self.height as f32 + 2.0
        });

        self.spawn_hearts();
    }

    fn spawn_hearts(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..2 {
            self.particles.push(Particle {
                x: rng.gen_range(0.0..self.width as f32),
                y: -1.0,
                vx: rng.gen_range(-0.2..0.2),
                vy: rng.gen_range(0.2..0.6),
                char: *HEART_CHARS.choose(&mut rng).unwrap(),
                color: random_rose_color(),
                lifetime: rng.gen_range(3.0..7.0),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Slow 0..1 throb for the sign-off line
    pub fn pulse(&self) -> f32 {
        (self.frame_count as f32 * 0.08).sin() * 0.5 + 0.5
    }
}

impl Default for FinaleScreen {
    fn default() -> Self {
        Self::new()
    }
}
