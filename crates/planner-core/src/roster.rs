use serde::{Deserialize, Serialize};

/// Sentinel roster entry for tasks nobody has picked up.
pub const UNASSIGNED: &str = "Unassigned";

/// The team as shipped; config may replace it.
pub const DEFAULT_MEMBERS: &[&str] = &[
    UNASSIGNED, "Ananya", "Divya", "Kavya", "Meera", "Sowmya", "Sanjana",
];

/// Badge colors assigned by member index. Fewer colors than members is
/// expected; the index wraps modulo the palette length on purpose so every
/// member always gets a stable color.
const MEMBER_PALETTE: &[&str] = &["#3b82f6", "#a855f7", "#ec4899", "#6366f1", "#14b8a6"];

const UNASSIGNED_COLOR: &str = "#6b7280";

/// Fixed list of people tasks can be assigned to, sentinel included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<String>,
}

impl Default for Roster {
    fn default() -> Self {
        Roster {
            members: DEFAULT_MEMBERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl Roster {
    pub fn from_members(members: Vec<String>) -> Self {
        Roster { members }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    pub fn initial_for(name: &str) -> String {
        if name == UNASSIGNED {
            return "U".to_string();
        }
        name.chars().next().map(String::from).unwrap_or_default()
    }

    /// Stable badge color for a member. Unknown names fall back to the first
    /// palette entry rather than failing.
    pub fn color_for(&self, name: &str) -> &'static str {
        if name == UNASSIGNED {
            return UNASSIGNED_COLOR;
        }
        match self.members.iter().position(|m| m == name) {
            Some(index) => MEMBER_PALETTE[index % MEMBER_PALETTE.len()],
            None => MEMBER_PALETTE[0],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_starts_with_sentinel() {
        let roster = Roster::default();
        assert_eq!(roster.members()[0], UNASSIGNED);
        assert!(roster.contains("Meera"));
        assert!(!roster.contains("Nobody"));
    }

    #[test]
    fn colors_are_stable_and_wrap() {
        let roster = Roster::default();
        // Seven members, five palette entries: index 5 and 6 wrap to 0 and 1.
        assert_eq!(roster.color_for("Sowmya"), MEMBER_PALETTE[0]);
        assert_eq!(roster.color_for("Sanjana"), MEMBER_PALETTE[1]);
        assert_eq!(roster.color_for("Ananya"), roster.color_for("Ananya"));
    }

    #[test]
    fn sentinel_gets_gray() {
        let roster = Roster::default();
        assert_eq!(roster.color_for(UNASSIGNED), UNASSIGNED_COLOR);
    }

    #[test]
    fn unknown_member_falls_back_to_first_color() {
        let roster = Roster::default();
        assert_eq!(roster.color_for("Stranger"), MEMBER_PALETTE[0]);
    }

    #[test]
    fn initials() {
        assert_eq!(Roster::initial_for(UNASSIGNED), "U");
        assert_eq!(Roster::initial_for("Divya"), "D");
    }
}
