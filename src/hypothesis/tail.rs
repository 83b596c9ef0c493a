use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TestError;

/// Which tail(s) of the null distribution count as evidence against H₀.
///
/// `Left` means "`x` tends to be smaller than `y`", `Right` the opposite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tail {
    /// Two-sided alternative.
    #[default]
    Both,
    /// Lower tail of U.
    Left,
    /// Upper tail of U.
    Right,
}

impl Tail {
    /// Every tail, in display order.
    pub const ALL: [Tail; 3] = [Tail::Both, Tail::Left, Tail::Right];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Tail::Both => "both",
            Tail::Left => "left",
            Tail::Right => "right",
        }
    }
}

impl FromStr for Tail {
    type Err = TestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(Tail::Both),
            "left" => Ok(Tail::Left),
            "right" => Ok(Tail::Right),
            _ => Err(TestError::InvalidTail(s.to_string())),
        }
    }
}

impl fmt::Display for Tail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
