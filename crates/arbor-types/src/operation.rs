use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The change a merged node or attribute requires to reach the new state.
///
/// `Create` and `Delete` are stamped over whole subtrees; `Update` and
/// `NoAction` are decided per node where both trees hold the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Create,
    Update,
    Delete,
    NoAction,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::NoAction,
    ];

    /// The wire name of this operation (`CREATE`, `NO_ACTION`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::NoAction => "NO_ACTION",
        }
    }

    /// Returns `true` for every operation except `NoAction`.
    pub fn is_change(&self) -> bool {
        !matches!(self, Operation::NoAction)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operation {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_display() {
        for op in Operation::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{op}\""));
        }
    }

    #[test]
    fn no_action_uses_underscore() {
        let op: Operation = serde_json::from_str("\"NO_ACTION\"").unwrap();
        assert_eq!(op, Operation::NoAction);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(serde_json::from_str::<Operation>("\"MOVE\"").is_err());
    }

    #[test]
    fn parses_wire_names() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
        }
        assert!("create".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }

    #[test]
    fn only_no_action_is_not_a_change() {
        assert!(Operation::Create.is_change());
        assert!(Operation::Update.is_change());
        assert!(Operation::Delete.is_change());
        assert!(!Operation::NoAction.is_change());
    }
}
