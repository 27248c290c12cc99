use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ADMIN_DIR: &str = ".actiontypes";
pub const CONFIG_FILE: &str = ".actiontypes/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn admin_dir(root: &Path) -> PathBuf {
    root.join(ADMIN_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/portal");
        assert_eq!(admin_dir(root), PathBuf::from("/tmp/portal/.actiontypes"));
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/portal/.actiontypes/config.yaml")
        );
    }
}
