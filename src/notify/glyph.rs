//! Mood token → display glyph table.
//!
//! Tokens arrive in English or Spanish depending on the client locale that
//! logged them. Matching is exact after trimming and lowercasing; anything
//! outside the table gets [`DEFAULT_GLYPH`].

/// Glyph shown for tokens outside the table.
pub const DEFAULT_GLYPH: &str = "💭";

const MOOD_GLYPHS: &[(&str, &str)] = &[
    ("great", "😄"),
    ("genial", "😄"),
    ("good", "🙂"),
    ("bien", "🙂"),
    ("okay", "😐"),
    ("ok", "😐"),
    ("normal", "😐"),
    ("bad", "😕"),
    ("mal", "😕"),
    ("awful", "😢"),
    ("fatal", "😢"),
    ("angry", "😠"),
    ("enojado", "😠"),
    ("tired", "😴"),
    ("cansado", "😴"),
    ("loved", "🥰"),
    ("enamorado", "🥰"),
];

/// Map a mood category token to its glyph.
#[must_use]
pub fn mood_glyph(token: &str) -> &'static str {
    let normalized = token.trim().to_lowercase();
    MOOD_GLYPHS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map_or(DEFAULT_GLYPH, |&(_, glyph)| glyph)
}
