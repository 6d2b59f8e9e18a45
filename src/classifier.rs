//! Keyword-based priority suggestion for new tasks

use crate::tasks::Priority;

/// Keywords that make a task urgent
pub const URGENT_KEYWORDS: [&str; 6] = [
    "deadline",
    "submit",
    "urgent",
    "immediately",
    "asap",
    "critical",
];

/// Keywords that make a task medium priority
pub const MEDIUM_KEYWORDS: [&str; 5] = ["meeting", "prepare", "review", "follow up", "remind"];

/// Suggest a priority from free text
///
/// Case-insensitive substring match. Urgent keywords are checked first and win
/// over medium ones; text matching neither list is `low`.
pub fn classify(text: &str) -> Priority {
    let lowered = text.to_lowercase();

    if URGENT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Priority::high
    } else if MEDIUM_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Priority::medium
    } else {
        Priority::low
    }
}
