use serde::{Deserialize, Serialize};

/// Priority level of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse priority from user input like "high"
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Display label matching the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort rank: high sorts before medium sorts before low
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// All priorities in display order (high first)
    pub fn all() -> &'static [Priority] {
        &[Priority::High, Priority::Medium, Priority::Low]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_label() {
        assert_eq!(Priority::from_label("low"), Some(Priority::Low));
        assert_eq!(Priority::from_label("medium"), Some(Priority::Medium));
        assert_eq!(Priority::from_label("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_label("urgent"), None);
    }

    #[test]
    fn test_priority_label_round_trip() {
        for p in Priority::all() {
            assert_eq!(Priority::from_label(p.label()), Some(*p));
        }
    }

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }
}
