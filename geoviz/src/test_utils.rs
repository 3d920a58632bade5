use std::path::PathBuf;
use std::sync::OnceLock;

/// Directory above this crate's manifest.
fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

fn test_output_dir() -> PathBuf {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = workspace_root().join("test_output");
        std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
        dir
    })
    .clone()
}

/// Path for an artifact written by a test; the file itself is not created.
pub fn test_output_path(name: &str) -> PathBuf {
    test_output_dir().join(name)
}

/// Writes `contents` to a fresh file under the test output directory.
pub fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = test_output_path(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}
