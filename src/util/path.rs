use std::borrow::Cow;

/// Normalized extension label for a repository path.
///
/// Only the final path component is considered. Returns the lowercase
/// extension with a leading dot (e.g. ".rs"), or "(no ext)" when the file
/// name has no usable extension (empty, or longer than 10 characters).
pub fn extension_label(path: &str) -> Cow<'static, str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.len() <= 10 => {
            Cow::Owned(format!(".{}", ext.to_ascii_lowercase()))
        }
        _ => Cow::Borrowed("(no ext)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths_use_file_name() {
        assert_eq!(extension_label("src/main.rs"), ".rs");
        assert_eq!(extension_label("assets/img/LOGO.PNG"), ".png");
        assert_eq!(extension_label("v1.2/Makefile"), "(no ext)");
    }

    #[test]
    fn test_dotfiles_and_multiple_dots() {
        assert_eq!(extension_label(".github/.gitignore"), ".gitignore");
        assert_eq!(extension_label("app.config.json"), ".json");
        assert_eq!(extension_label("trailing."), "(no ext)");
    }

    #[test]
    fn test_long_extension_rejected() {
        assert_eq!(extension_label("dump.verylongextension"), "(no ext)");
    }
}
