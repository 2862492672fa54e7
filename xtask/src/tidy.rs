use std::{
    fs,
    path::{Path, PathBuf},
};

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().to_path_buf()
}

#[test]
fn versions_agree() {
    let root = project_root();
    let manifest = fs::read_to_string(root.join("Cargo.toml")).unwrap();
    let version = manifest
        .lines()
        .find_map(|it| it.strip_prefix("version = \""))
        .and_then(|it| it.split('"').next())
        .unwrap();

    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(
        readme.contains(&format!("flagval = \"{version}\"")),
        "README.md does not mention version {version}"
    );
}

#[test]
fn no_trailing_whitespace() {
    let root = project_root();
    let mut bad = Vec::new();
    for dir in ["src", "tests", "demos", "xtask/src"] {
        check_dir(&root.join(dir), &mut bad);
    }
    assert!(bad.is_empty(), "trailing whitespace:\n{}", bad.join("\n"));
}

fn check_dir(dir: &Path, bad: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            check_dir(&path, bad);
            continue;
        }
        if path.extension().map_or(true, |it| it != "rs") {
            continue;
        }
        let text = fs::read_to_string(&path).unwrap();
        for (idx, line) in text.lines().enumerate() {
            if line.ends_with(' ') || line.ends_with('\t') {
                bad.push(format!("{}:{}", path.display(), idx + 1));
            }
        }
    }
}
