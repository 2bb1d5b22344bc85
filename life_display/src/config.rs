// config.rs - Compile-time configuration

use life_engine::{EncodeError, Protocol, SeedPolicy, find_pattern};
use std::num::NonZeroUsize;
use thiserror::Error;

pub const GRID_WIDTH: usize = 500;
pub const GRID_HEIGHT: usize = 500;
pub const PROTOCOL: Protocol = Protocol::Off;
pub const VISUAL_OUT: bool = true;
pub const WORKERS: Option<usize> = None; // None: one per hardware thread
pub const SEED: Option<u64> = None; // None: seed from OS entropy
pub const SEED_POLICY: SeedPolicy = SeedPolicy::Living;
pub const PATTERN: Option<&str> = None; // e.g. Some("Glider") instead of a random fill
pub const GENERATIONS: Option<u64> = None; // None: run until stopped

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("{0:?} frames cannot be streamed while the live view is enabled")]
    VisualWithStream(Protocol),
    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),
    #[error(transparent)]
    Unencodable(#[from] EncodeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub protocol: Protocol,
    pub visual: bool,
    /// `None`: one worker per hardware thread.
    pub workers: Option<NonZeroUsize>,
    pub seed: Option<u64>,
    pub seed_policy: SeedPolicy,
    pub pattern: Option<&'static str>,
    pub generations: Option<u64>,
}

impl Config {
    pub fn from_constants() -> Result<Self, ConfigError> {
        Self::resolve(Settings {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            protocol: PROTOCOL,
            visual: VISUAL_OUT,
            workers: WORKERS,
            seed: SEED,
            seed_policy: SEED_POLICY,
            pattern: PATTERN,
            generations: GENERATIONS,
        })
    }

    fn resolve(s: Settings) -> Result<Self, ConfigError> {
        if s.width == 0 || s.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: s.width,
                height: s.height,
            });
        }
        let workers = s
            .workers
            .map(|n| NonZeroUsize::new(n).ok_or(ConfigError::NoWorkers))
            .transpose()?;
        if s.visual && s.protocol != Protocol::Off {
            return Err(ConfigError::VisualWithStream(s.protocol));
        }
        if let Some(name) = s.pattern {
            find_pattern(name).ok_or_else(|| ConfigError::UnknownPattern(name.to_string()))?;
        }
        s.protocol.supports(s.width, s.height)?;

        Ok(Self {
            width: s.width,
            height: s.height,
            protocol: s.protocol,
            visual: s.visual,
            workers,
            seed: s.seed,
            seed_policy: s.seed_policy,
            pattern: s.pattern,
            generations: s.generations,
        })
    }
}

/// Unvalidated inputs to [`Config::resolve`].
struct Settings {
    width: usize,
    height: usize,
    protocol: Protocol,
    visual: bool,
    workers: Option<usize>,
    seed: Option<u64>,
    seed_policy: SeedPolicy,
    pattern: Option<&'static str>,
    generations: Option<u64>,
}
