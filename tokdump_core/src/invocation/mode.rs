//! Output modes

use super::error::ArgumentError;
use serde::Serialize;
use std::fmt;

/// How whitespace tokens are rendered. Built once, then passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Whitespace printed as `(SPACE)`, `(TAB)`, `(NEWLINE)`
    #[default]
    Literal,
    /// Whitespace printed as the byte itself
    Raw,
    /// Whitespace tokens dropped
    SuppressBlank,
    /// Runs of two or more spaces collapsed into `(SPACEx{n})`
    GroupSpaces,
}

/// Mode flags exactly as given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub raw: bool,
    pub suppress_blank: bool,
    pub group_spaces: bool,
}

impl ModeFlags {
    fn selected(&self) -> Vec<Mode> {
        [
            (self.raw, Mode::Raw),
            (self.suppress_blank, Mode::SuppressBlank),
            (self.group_spaces, Mode::GroupSpaces),
        ]
        .into_iter()
        .filter_map(|(set, mode)| set.then_some(mode))
        .collect()
    }
}

impl Mode {
    /// Resolve command-line flags; the three non-default modes are pairwise exclusive
    pub fn from_flags(flags: ModeFlags) -> Result<Self, ArgumentError> {
        let selected = flags.selected();

        match selected.as_slice() {
            [] => Ok(Mode::Literal),
            [mode] => Ok(*mode),
            [_, offending, ..] => {
                let conflicts = Self::exclusive()
                    .into_iter()
                    .filter(|mode| mode != offending)
                    .filter_map(|mode| mode.flag_name())
                    .collect::<Vec<_>>();

                Err(ArgumentError::IncompatibleFlags {
                    flag: offending.flag_name().unwrap_or_default(),
                    conflicts,
                })
            }
        }
    }

    fn exclusive() -> [Mode; 3] {
        [Mode::Raw, Mode::SuppressBlank, Mode::GroupSpaces]
    }

    /// Long command-line flag selecting this mode
    pub fn flag_name(&self) -> Option<&'static str> {
        match self {
            Mode::Literal => None,
            Mode::Raw => Some("--raw"),
            Mode::SuppressBlank => Some("--suppress-blank"),
            Mode::GroupSpaces => Some("--group-spaces"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Literal => "literal",
            Mode::Raw => "raw",
            Mode::SuppressBlank => "suppress-blank",
            Mode::GroupSpaces => "group-spaces",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
