use std::sync::LazyLock;

/// Short commit hash embedded by the build script, when git was available.
const COMMIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");
const GIT_DIRTY: Option<&str> = option_env!("VERGEN_GIT_DIRTY");

/// Defines the application version.
pub static VERSION: LazyLock<String> =
    LazyLock::new(|| render(env!("IMAGE_VERSION"), COMMIT_SHA, GIT_DIRTY));

fn render(image_version: &str, sha: Option<&str>, dirty: Option<&str>) -> String {
    format!(
        "{}-{}{}",
        image_version,
        sha.unwrap_or("unknown"),
        if dirty == Some("true") { "-dirty" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn render_marks_dirty_trees() {
        assert_eq!(render("v1", Some("abc123"), Some("true")), "v1-abc123-dirty");
        assert_eq!(render("v1", Some("abc123"), Some("false")), "v1-abc123");
    }

    #[test]
    fn render_without_git_metadata() {
        assert_eq!(render("latest", None, None), "latest-unknown");
    }
}
