pub mod languages;
pub mod files;

pub use languages::{is_code_language, CODE_LANGUAGES};

/// Lowercase substrings marking a commit as trivial (docs, typos, version bumps).
pub const TRIVIAL_COMMIT_PATTERNS: &[&str] = &[
    "update readme",
    "readme",
    "update md",
    "typo",
    "fix typo",
    "minor",
    "small fix",
    "formatting",
    "whitespace",
    "docs only",
    "readme.md",
    "documentation",
    "update doc",
    "bump version",
];

pub fn is_trivial_commit(message: &str) -> bool {
    let lower = message.to_lowercase();
    TRIVIAL_COMMIT_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}
