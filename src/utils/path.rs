use std::path::{MAIN_SEPARATOR, PathBuf};

/// Expand a leading `~` (alone or followed by a separator) to the home
/// directory. Anything else, including `~user`, is returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(r) if r.is_empty() || r.starts_with(['/', MAIN_SEPARATOR]) => r,
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', MAIN_SEPARATOR])),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_leading_home_marker_expands() {
        assert_eq!(expand_tilde("/tmp/a.xlsx"), PathBuf::from("/tmp/a.xlsx"));
        assert_eq!(expand_tilde("~bob/a"), PathBuf::from("~bob/a"));
        assert_eq!(expand_tilde("a/~/b"), PathBuf::from("a/~/b"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/x/y.png"), home.join("x/y.png"));
        }
    }
}
