use serde::{Deserialize, Serialize};
use std::fmt;

/// Process-wide attendance status, persisted under `current_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Off,
    Working,
    Breaking,
}

impl Status {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Status::Off => "off",
            Status::Working => "working",
            Status::Breaking => "breaking",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Status::Off),
            "working" => Some(Status::Working),
            "breaking" => Some(Status::Breaking),
            _ => None,
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, Status::Off)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_strings_round_trip() {
        for s in [Status::Off, Status::Working, Status::Breaking] {
            assert_eq!(Status::from_db_str(s.to_db_str()), Some(s));
        }
        assert_eq!(Status::from_db_str("sleeping"), None);
        assert_eq!(Status::default(), Status::Off);
    }
}
