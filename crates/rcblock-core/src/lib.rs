//! Shell startup file wiring for rcblock
//!
//! Turns an explicit [`WiringConfig`] into managed blocks and applies them to
//! the user's shell startup files:
//!
//! ```text
//!                   rcblock-cli
//!                        |
//!                  rcblock-core      config -> render -> engine
//!                        |
//!              +---------+---------+
//!              |                   |
//!       rcblock-blocks        rcblock-fs
//! ```
//!
//! Two blocks exist per target: `env` (exports for `MAMBA_ROOT_PREFIX`,
//! `MAMBA_EXE`, `PATH` and extra variables) and `hook` (the micromamba shell
//! hook, interactive bash/zsh only).

pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod shell;

pub use config::{TargetConfig, WiringConfig};
pub use engine::{BlockState, PlannedBlock, WiringEngine, WiringOptions, WiringReport};
pub use error::{Error, Result};
pub use shell::{BlockKind, Shell};
