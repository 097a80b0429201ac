//! Chat Action Tags
//!
//! The client picks a persona per request. The set is closed: anything the
//! server does not recognise is answered with the default persona.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionTag {
    #[default]
    Default,
    Summarize,
    Plan,
    Analyze,
    Advice,
}

impl ActionTag {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Summarize,
        Self::Plan,
        Self::Analyze,
        Self::Advice,
    ];

    /// Resolve a client tag. Unknown, empty, or missing tags map to `Default`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("summarize") => Self::Summarize,
            Some("plan") => Self::Plan,
            Some("analyze") => Self::Analyze,
            Some("advice") => Self::Advice,
            _ => Self::Default,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Summarize => "summarize",
            Self::Plan => "plan",
            Self::Analyze => "analyze",
            Self::Advice => "advice",
        }
    }

    /// System instruction that opens the prompt
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Default => {
                "You are Ian's AI assistant. You can help with general questions, calculations, and information about Ian's work. Be direct and precise in your answers."
            }
            Self::Summarize => {
                "You are a text summarization expert. Provide clear, concise summaries while maintaining key information."
            }
            Self::Plan => {
                "You are a planning expert. Create detailed, actionable plans with clear steps and timelines."
            }
            Self::Analyze => {
                "You are a data analysis expert. Provide insightful analysis and clear explanations of data patterns."
            }
            Self::Advice => {
                "You are a career and technical advisor. Provide thoughtful, practical advice based on industry best practices."
            }
        }
    }
}

impl std::fmt::Display for ActionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for tag in ActionTag::ALL {
            assert_eq!(ActionTag::from_tag(Some(tag.as_str())), tag);
        }
    }

    #[test]
    fn test_unknown_tags_fall_back_to_default() {
        assert_eq!(ActionTag::from_tag(None), ActionTag::Default);
        assert_eq!(ActionTag::from_tag(Some("")), ActionTag::Default);
        assert_eq!(ActionTag::from_tag(Some("bogus")), ActionTag::Default);
        assert_eq!(ActionTag::from_tag(Some("PLAN")), ActionTag::Default);
    }

    #[test]
    fn test_instructions_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for tag in ActionTag::ALL {
            assert!(seen.insert(tag.instruction()));
        }
    }
}
