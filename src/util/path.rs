use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tilde_when_expanding_then_uses_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path(Path::new("~/referrals.json"));
        assert!(expanded.starts_with(&home));
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn given_unknown_variable_when_expanding_then_keeps_input() {
        let input = Path::new("$REFNET_SURELY_UNSET_VARIABLE/x.json");
        assert_eq!(expand_path(input), input.to_path_buf());
    }
}
