//! Error types
//!
//! Gameplay never errors: crashes are state transitions. These cover bad
//! tuning and platform setup.

use thiserror::Error;

/// Rejected gameplay configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a finite positive number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("jump_impulse must be negative (upward), got {0}")]
    JumpNotUpward(f32),
    #[error("min_margin must be finite and non-negative, got {0}")]
    BadMargin(f32),
    #[error(
        "a gap of {gap_size} with {min_margin} margins does not fit a field {field_height} tall"
    )]
    GapDoesNotFit {
        gap_size: f32,
        min_margin: f32,
        field_height: f32,
    },
    #[error("bird starting at ({x}, {y}) does not fit inside the field")]
    StartOutOfField { x: f32, y: f32 },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure while bringing up the WebGPU surface
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
