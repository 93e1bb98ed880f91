use std::fmt;
use std::str::FromStr;

/// Filter passed to the daemon's pin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinType {
    #[default]
    Recursive,
    Direct,
    Indirect,
    All,
}

impl PinType {
    pub const ACCEPTED: [&'static str; 4] = ["recursive", "direct", "indirect", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PinType::Recursive => "recursive",
            PinType::Direct => "direct",
            PinType::Indirect => "indirect",
            PinType::All => "all",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid --pin-type value: {0}. Must be one of recursive, direct, indirect, all.")]
pub struct PinTypeError(pub String);

impl FromStr for PinType {
    type Err = PinTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recursive" => Ok(PinType::Recursive),
            "direct" => Ok(PinType::Direct),
            "indirect" => Ok(PinType::Indirect),
            "all" => Ok(PinType::All),
            other => Err(PinTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for PinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
