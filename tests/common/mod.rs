use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a project root with the makefile marker and a scripts/ directory.
pub fn create_root() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("makefile"), "# build marker\n").expect("Failed to write makefile");
    fs::create_dir_all(dir.path().join("scripts")).expect("Failed to create scripts dir");
    dir
}

/// Install an executable launch script under `<root>/scripts/<name>`.
pub fn write_script(root: &Path, name: &str, body: &str) -> PathBuf {
    let path = root.join("scripts").join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    let mut perms = fs::metadata(&path).expect("Failed to stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to chmod script");
    path
}

/// Console transcript with the success verdict on line 5.
pub fn passing_script() -> &'static str {
    "echo 'booting kernel'\n\
     echo 'initializing heap'\n\
     echo 'starting threads'\n\
     echo 'running self tests'\n\
     echo 'SUCCESS! All test cases passed'"
}

/// Console transcript ending in the failure verdict.
pub fn failing_script() -> &'static str {
    "echo 'booting kernel'\n\
     echo 'FAILURE! Some test cases failed'"
}

/// Prints one line then stays alive until killed.
pub fn hanging_script() -> &'static str {
    "echo 'booting kernel'\nexec sleep 600"
}

/// Prints half a line (no terminator) then stalls until killed.
pub fn stalling_script() -> &'static str {
    "printf 'half a line'\nexec sleep 600"
}
