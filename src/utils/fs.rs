use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Names of the immediate subdirectories of `path`, sorted.
/// Plain files are ignored. Symlinks to directories count as directories;
/// broken links are skipped.
pub async fn list_subdirectories(path: &Path) -> Result<Vec<String>, std::io::Error> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(path).await?;

    while let Some(entry) = entries.next_entry().await? {
        let is_dir = match fs::metadata(entry.path()).await {
            Ok(meta) => meta.is_dir(),
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "Skipping unreadable entry");
                false
            }
        };
        if is_dir {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Copy a directory tree. Returns the number of files copied.
/// Fails with `NotFound` when `src` is not a directory, before `dst` is touched.
pub async fn copy_dir_all(src: &Path, dst: &Path) -> Result<usize, std::io::Error> {
    let mut files_copied = 0;

    if !fs::metadata(src).await?.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", src.display()),
        ));
    }
    fs::create_dir_all(dst).await?;

    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(std::io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(std::io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).await?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::copy(entry.path(), &target).await?;
            files_copied += 1;
        }
    }

    Ok(files_copied)
}

/// Move a directory tree. Tries a rename first and falls back to
/// copy-then-delete when the rename is refused (e.g. across devices).
pub async fn move_dir(src: &Path, dst: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).await?;
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!(
                from = %src.display(),
                to = %dst.display(),
                error = %e,
                "Rename failed, copying instead"
            );
            copy_dir_all(src, dst).await?;
            fs::remove_dir_all(src).await
        }
    }
}

/// Remove `path` if it exists, whether it is a directory or a file.
/// Returns true when something was removed.
pub async fn remove_existing(path: &Path) -> Result<bool, std::io::Error> {
    match fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).await?;
            Ok(true)
        }
        Ok(_) => {
            fs::remove_file(path).await?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Absolute form of `path` with symlinks resolved, for paths that may not
/// exist yet: the deepest existing ancestor is canonicalized and the rest is
/// appended as given.
pub async fn resolve_path(path: &Path) -> Result<PathBuf, std::io::Error> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    loop {
        match fs::canonicalize(existing).await {
            Ok(resolved) => {
                return Ok(rest
                    .iter()
                    .rev()
                    .fold(resolved, |acc: PathBuf, part| acc.join(part)));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                match (existing.parent(), existing.file_name()) {
                    (Some(parent), Some(name)) => {
                        rest.push(name.to_os_string());
                        existing = parent;
                    }
                    _ => return Ok(absolute.clone()),
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// True when one path is the other or lies inside it
pub async fn paths_overlap(a: &Path, b: &Path) -> Result<bool, std::io::Error> {
    let a = resolve_path(a).await?;
    let b = resolve_path(b).await?;
    Ok(a.starts_with(&b) || b.starts_with(&a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_dir_all_copies_nested_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("media/lua")).unwrap();
        std::fs::write(src.join("mod.info"), "name=ModA").unwrap();
        std::fs::write(src.join("media/lua/init.lua"), "print(1)").unwrap();

        let dst = temp.path().join("dst");
        let copied = copy_dir_all(&src, &dst).await.unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            std::fs::read_to_string(dst.join("media/lua/init.lua")).unwrap(),
            "print(1)"
        );
        assert!(src.exists(), "Copy must leave the source in place");
    }

    #[tokio::test]
    async fn test_copy_dir_all_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let dst = temp.path().join("dst");

        let err = copy_dir_all(&temp.path().join("gone"), &dst)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(!dst.exists(), "Destination must not be created");
    }

    #[tokio::test]
    async fn test_paths_overlap() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("100/mods/ModA");
        std::fs::create_dir_all(&src).unwrap();

        // Same folder spelled differently
        assert!(paths_overlap(&src, &temp.path().join("100/mods/./ModA"))
            .await
            .unwrap());
        assert!(paths_overlap(&src, &src.join("nested")).await.unwrap());
        assert!(paths_overlap(&temp.path().join("100"), &src).await.unwrap());
        assert!(!paths_overlap(&src, &temp.path().join("dest/ModA"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_move_dir_removes_source() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("mod.info"), "x").unwrap();

        let dst = temp.path().join("out/dst");
        move_dir(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert!(dst.join("mod.info").exists());
    }

    #[tokio::test]
    async fn test_list_subdirectories_skips_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("b")).unwrap();
        std::fs::create_dir(temp.path().join("a")).unwrap();
        std::fs::write(temp.path().join("mods_info.json"), "{}").unwrap();

        let names = list_subdirectories(temp.path()).await.unwrap();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_subdirectories_follows_symlinks() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("elsewhere");
        std::fs::create_dir(&target).unwrap();
        let root = temp.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(&target, root.join("linked")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("missing"), root.join("broken")).unwrap();

        let names = list_subdirectories(&root).await.unwrap();
        assert_eq!(names, vec!["linked".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_existing_missing_is_noop() {
        let temp = TempDir::new().unwrap();
        let removed = remove_existing(&temp.path().join("nope")).await.unwrap();
        assert!(!removed);
    }
}
