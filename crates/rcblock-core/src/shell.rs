//! Shell dialects and block kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Dialect of a startup file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    /// `~/.bashrc` and friends.
    Bash,
    /// `~/.zshrc`.
    Zsh,
    /// POSIX sh: `~/.profile` and the non-interactive env file.
    Posix,
}

impl Shell {
    /// Name micromamba expects for `shell hook --shell`, if it has a hook.
    pub fn hook_name(&self) -> Option<&'static str> {
        match self {
            Shell::Bash => Some("bash"),
            Shell::Zsh => Some("zsh"),
            Shell::Posix => None,
        }
    }

    pub fn supports(&self, kind: BlockKind) -> bool {
        match kind {
            BlockKind::Env => true,
            BlockKind::Hook => self.hook_name().is_some(),
        }
    }
}

impl FromStr for Shell {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "posix" | "sh" | "profile" => Ok(Shell::Posix),
            _ => Err(Error::Unknown {
                what: "shell",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
            Shell::Posix => write!(f, "posix"),
        }
    }
}

/// Logical concern a block is responsible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Environment variable exports.
    Env,
    /// micromamba shell hook activation.
    Hook,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Env => "env",
            BlockKind::Hook => "hook",
        }
    }

    pub fn all() -> [BlockKind; 2] {
        [BlockKind::Env, BlockKind::Hook]
    }
}

impl FromStr for BlockKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "env" => Ok(BlockKind::Env),
            "hook" => Ok(BlockKind::Hook),
            _ => Err(Error::Unknown {
                what: "block",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
