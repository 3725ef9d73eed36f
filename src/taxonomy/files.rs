use crate::models::CiProvider;

// All names are lowercase; callers lowercase listing entries before matching.

pub const README_FILES: &[&str] = &["readme.md", "readme.txt", "readme", "readme.rst"];

pub const LICENSE_FILES: &[&str] = &["license", "license.md", "license.txt", "licence", "copying"];

pub const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "spec", "specs", "_tests_"];

pub const TEST_FILES: &[&str] = &["test.py", "tests.py", "test.js", "pytest.ini", "jest.config.js"];

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Directory whose `workflows` subdirectory marks GitHub Actions.
pub const GITHUB_DIR: &str = ".github";

/// Files or directories naming a CI provider, in precedence order.
pub const CI_MARKERS: &[(&str, CiProvider)] = &[
    (".travis.yml", CiProvider::Travis),
    ("jenkinsfile", CiProvider::Jenkins),
    (".circleci", CiProvider::Circleci),
    ("azure-pipelines.yml", CiProvider::Azure),
    (".gitlab-ci.yml", CiProvider::Gitlab),
];
