use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// A scratch directory under `std::env::temp_dir()`, unique per test within
/// a single process run, removed on drop. No dependency on a fixture crate
/// like `tempfile` — this mirrors the teacher's own lack of one anywhere in
/// its core crates.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("lbconf-core-test-{}-{id}", std::process::id()));
        std::fs::create_dir_all(&path).expect("create scratch dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create nested scratch dir");
        }
        std::fs::write(&path, contents).expect("write scratch file");
        path
    }

    pub fn mkdir(&self, name: &str) -> PathBuf {
        let path = self.path.join(name);
        std::fs::create_dir_all(&path).expect("create scratch subdir");
        path
    }

    #[cfg(unix)]
    pub fn make_executable(&self, name: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = self.path.join(name);
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(perms.mode() | 0o111);
        std::fs::set_permissions(&path, perms).expect("chmod +x scratch file");
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
