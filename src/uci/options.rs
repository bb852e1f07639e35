use std::io::{self, Write};

use crate::search::{Level, DEFAULT_DEPTH};

/// Deepest search accepted from the front-end
pub const MAX_DEPTH: u32 = 8;

pub enum UciOptionAction {
    Reseed(u64),
}

/// Engine settings changed through `setoption`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    pub depth: u32,
    pub easy: bool,
    /// Tie-break seed; `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            depth: DEFAULT_DEPTH,
            easy: false,
            seed: None,
        }
    }
}

impl EngineOptions {
    #[must_use]
    pub fn level(&self) -> Level {
        if self.easy {
            Level::Easy
        } else {
            Level::Medium { depth: self.depth }
        }
    }

    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            self.depth, MAX_DEPTH
        )?;
        writeln!(
            out,
            "option name Level type combo default {} var Easy var Medium",
            if self.easy { "Easy" } else { "Medium" }
        )?;
        writeln!(out, "option name Seed type string default <random>")?;
        writeln!(out, "uciok")
    }

    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Option<UciOptionAction> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "depth" => {
                if let Some(v) = value.and_then(|v| v.trim().parse::<u32>().ok()) {
                    self.depth = v.clamp(1, MAX_DEPTH);
                }
            }
            "level" => {
                if let Some(v) = value {
                    match v.trim().to_ascii_lowercase().as_str() {
                        "easy" => self.easy = true,
                        "medium" => self.easy = false,
                        other => log::warn!("unknown level '{other}'"),
                    }
                }
            }
            "seed" => {
                if let Some(v) = value.and_then(|v| v.trim().parse::<u64>().ok()) {
                    self.seed = Some(v);
                    return Some(UciOptionAction::Reseed(v));
                }
            }
            _ => log::debug!("ignoring unknown option '{name}'"),
        }
        None
    }
}

/// Split `setoption name <id...> [value <x...>]` into the option name and
/// its value. Both may contain spaces.
#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    let rest = match parts {
        ["setoption", "name", rest @ ..] => rest,
        _ => return None,
    };

    let (name, value) = match rest.iter().position(|p| *p == "value") {
        Some(at) => (&rest[..at], Some(&rest[at + 1..])),
        None => (rest, None),
    };
    if name.is_empty() {
        return None;
    }

    let value = value.filter(|v| !v.is_empty()).map(|v| v.join(" "));
    Some((name.join(" "), value))
}
