/// Languages whose repositories count as code. Anything else, including repos
/// with no detected language, is treated as documentation or configuration.
pub const CODE_LANGUAGES: &[&str] = &[
    "Python",
    "JavaScript",
    "TypeScript",
    "Java",
    "C++",
    "C",
    "C#",
    "Go",
    "Rust",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Dart",
    "Shell",
    "HTML",
    "CSS",
    "Vue",
    "Svelte",
    "Lua",
    "Perl",
    "Scala",
    "Elixir",
];

/// Exact (case-sensitive) match against the hosting API's language label.
pub fn is_code_language(language: &str) -> bool {
    CODE_LANGUAGES.contains(&language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_languages() {
        assert!(is_code_language("Rust"));
        assert!(is_code_language("C#"));
        assert!(is_code_language("HTML"));
        assert!(!is_code_language("Jupyter Notebook"));
        assert!(!is_code_language("TeX"));
        assert!(!is_code_language("rust"));
    }
}
