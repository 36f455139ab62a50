//! Idempotent marked-block patching for text files.
//!
//! A managed block is a region of a text file bounded by two literal
//! sentinel lines:
//!
//! ```text
//! # >>> rcblock env >>>
//! export MAMBA_ROOT_PREFIX="/opt/mamba"
//! # <<< rcblock env <<<
//! ```
//!
//! [`MarkedBlockPatcher`] keeps exactly one up-to-date copy of such a block
//! in a document: it installs missing blocks, replaces stale ones, collapses
//! duplicates left behind by older runs and refuses to touch files whose
//! markers are unbalanced. The first modification of a pre-existing file
//! snapshots it to `<path>.bak.<namespace>`.
//!
//! The [`parser`] and [`writer`] modules are pure line transforms; only
//! [`patcher`] touches the filesystem.

pub mod diff;
pub mod error;
pub mod parser;
pub mod patcher;
pub mod spec;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{BlockScan, Region, scan};
pub use patcher::{BlockStatus, MarkedBlockPatcher, PatchAction, PatchOutcome};
pub use spec::BlockSpec;
