//! Fireworks show library
//!
//! A frame-driven firework particle show: projectiles launch from the bottom of
//! the canvas, burst into fading fragments at their targets, and leave ghost
//! trails through a persistent, erase-faded canvas.
//!
//! The simulation core ([`show`], [`projectile`], [`fragment`]) draws through the
//! [`surface::DrawSurface`] trait and has no Bevy ECS dependencies; the
//! [`simulation`], [`graphics`] and [`input`] modules host it inside a Bevy app.

pub mod canvas;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod explosion;
pub mod fragment;
pub mod gate;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod projectile;
pub mod random;
pub mod show;
pub mod simulation;
pub mod surface;
pub mod trail;
