use crate::models::{CiProvider, ContentEntry, QualityIndicators};
use crate::taxonomy::files::{
    CI_MARKERS, GITHUB_DIR, GITIGNORE_FILE, LICENSE_FILES, README_FILES, TEST_DIRS, TEST_FILES,
};

/// Whether the root listing has a `.github` directory worth probing for workflows.
pub fn has_github_dir(entries: &[ContentEntry]) -> bool {
    entries
        .iter()
        .any(|e| e.is_dir() && e.name.eq_ignore_ascii_case(GITHUB_DIR))
}

/// Quality indicators from a repository's root listing.
///
/// `has_workflows` is the result of the separate `.github/workflows` probe.
pub fn detect_quality(entries: &[ContentEntry], has_workflows: bool) -> QualityIndicators {
    let files: Vec<(String, &ContentEntry)> = entries
        .iter()
        .filter(|e| e.is_file())
        .map(|e| (e.name.to_lowercase(), e))
        .collect();
    let dirs: Vec<String> = entries
        .iter()
        .filter(|e| e.is_dir())
        .map(|e| e.name.to_lowercase())
        .collect();

    let has_file = |name: &str| files.iter().any(|(n, _)| n == name);
    let has_dir = |name: &str| dirs.iter().any(|d| d == name);

    let readme = README_FILES
        .iter()
        .find_map(|candidate| files.iter().find(|(n, _)| n.as_str() == *candidate));

    let mut ci_cd_type = has_workflows.then_some(CiProvider::GithubActions);
    if let Some((_, provider)) = CI_MARKERS
        .iter()
        .find(|(marker, _)| has_file(marker) || has_dir(marker))
    {
        ci_cd_type = Some(*provider);
    }

    QualityIndicators {
        has_readme: readme.is_some(),
        readme_length: readme.map(|(_, entry)| entry.size).unwrap_or(0),
        has_license: LICENSE_FILES.iter().any(|f| has_file(f)),
        has_tests: TEST_DIRS.iter().any(|d| has_dir(d)) || TEST_FILES.iter().any(|f| has_file(f)),
        has_ci_cd: ci_cd_type.is_some(),
        ci_cd_type,
        has_gitignore: has_file(GITIGNORE_FILE),
    }
}
