//! Mood-driven trait overrides.
//!
//! Setting a cat's mood forces its ears and whiskers to mood-consistent
//! values. The mouth follows too, unless the cat already had a `mouth` key
//! before the override ran.

use crate::value::Cat;

/// Target traits for a mood. `mouth: None` clears the mouth to unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodRule {
    pub mood: &'static str,
    pub ears: &'static str,
    pub whiskers: &'static str,
    pub mouth: Option<&'static str>,
}

const fn rule(
    mood: &'static str,
    ears: &'static str,
    whiskers: &'static str,
    mouth: Option<&'static str>,
) -> MoodRule {
    MoodRule {
        mood,
        ears,
        whiskers,
        mouth,
    }
}

pub const MOOD_RULES: [MoodRule; 7] = [
    rule("sleepy", "droopy", "short", Some("neutral")),
    rule("happy", "short", "long", Some("smile")),
    rule("angry", "round", "curled", Some("scowl")),
    rule("loving", "pointy", "long", Some("kiss")),
    rule("curious", "short", "long", None),
    rule("excited", "long", "long", Some("open")),
    rule("sad", "droopy", "short", Some("frown")),
];

/// Case-insensitive lookup in the mood table.
pub fn rule_for(mood: &str) -> Option<&'static MoodRule> {
    MOOD_RULES
        .iter()
        .find(|rule| rule.mood.eq_ignore_ascii_case(mood))
}

/// Applies the override for the cat's current mood in place.
///
/// Unset or unrecognized moods leave every trait untouched.
pub fn apply_mood_override(cat: &mut Cat) -> &mut Cat {
    let mouth_locked = cat.contains("mouth");
    let Some(rule) = cat.get("mood").and_then(rule_for) else {
        return cat;
    };
    cat.set("ears", Some(rule.ears.to_string()));
    cat.set("whiskers", Some(rule.whiskers.to_string()));
    if !mouth_locked {
        cat.set("mouth", rule.mouth.map(str::to_string));
    }
    cat
}
