//! Cosmetic particles
//!
//! Never gameplay-affecting, but spawned by simulation events so a renderer
//! sees the same bursts the game logic triggered.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::angle_to_vec;
use crate::consts::MAX_PARTICLES;

/// Palette hint for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    /// Orange/yellow explosion debris
    Fire,
    /// Boss phase transition flash
    White,
    /// Extra life
    Green,
    /// Speed pickup
    Teal,
    /// Bomb blast
    Blast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub tint: ParticleTint,
}

impl Particle {
    /// Opacity for rendering (1 at birth, 0 at expiry)
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Bounded particle store; oldest particles are dropped when full
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: VecDeque<Particle>,
}

impl ParticlePool {
    /// Emit `count` particles scattered from `origin`
    pub fn burst<R: Rng>(&mut self, rng: &mut R, origin: Vec2, count: usize, tint: ParticleTint) {
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(50.0..200.0);
            let max_life = rng.random_range(0.1..0.5);
            let particle = Particle {
                pos: origin,
                vel: angle_to_vec(angle, speed),
                size: rng.random_range(2.0..6.0),
                life: max_life,
                max_life,
                tint,
            };
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.pop_front();
            }
            self.particles.push_back(particle);
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
