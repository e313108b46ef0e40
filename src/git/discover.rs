use anyhow::{bail, Result};
use git2::Repository;
use ignore::WalkBuilder;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Find Git repositories at or below the given roots.
///
/// A directory counts once it carries a `.git` entry and libgit2 agrees to
/// open it. Anything nested inside an already-found working tree (vendored
/// checkouts, submodules) is skipped.
pub fn discover_repositories(
    roots: &[PathBuf],
    max_depth: Option<usize>,
) -> Result<Vec<PathBuf>> {
    let mut repos: Vec<PathBuf> = Vec::new();

    for root in roots {
        if !root.exists() {
            bail!("repository root does not exist: {}", root.display());
        }

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(false)
            .max_depth(max_depth)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable path under {}: {}", root.display(), err);
                    continue;
                }
            };
            if !entry.file_type().map_or(false, |t| t.is_dir()) {
                continue;
            }

            let path = entry.path();
            if repos.iter().any(|found| path != found && path.starts_with(found)) {
                continue;
            }
            if !path.join(".git").exists() {
                continue;
            }

            match Repository::open(path) {
                Ok(_) => {
                    debug!("Discovered repository at {}", path.display());
                    repos.push(path.to_path_buf());
                }
                Err(err) => {
                    warn!(
                        "Ignoring {}: has a .git entry but cannot be opened ({})",
                        path.display(),
                        err
                    );
                }
            }
        }
    }

    repos.sort();
    repos.dedup();
    Ok(repos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn finds_repository_at_the_root_itself() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let repos = discover_repositories(&[dir.path().to_path_buf()], None).unwrap();
        assert_eq!(repos, vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn finds_repositories_below_a_root() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path().join("one")).unwrap();
        Repository::init(dir.path().join("two")).unwrap();
        std::fs::create_dir_all(dir.path().join("not_a_repo")).unwrap();

        let repos = discover_repositories(&[dir.path().to_path_buf()], None).unwrap();
        assert_eq!(repos.len(), 2);
        assert!(repos.contains(&dir.path().join("one")));
        assert!(repos.contains(&dir.path().join("two")));
    }

    #[test]
    fn skips_working_trees_nested_inside_a_found_repository() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path().join("outer")).unwrap();
        Repository::init(dir.path().join("outer/vendor/inner")).unwrap();
        Repository::init(dir.path().join("sibling")).unwrap();

        let repos = discover_repositories(&[dir.path().to_path_buf()], None).unwrap();
        assert_eq!(repos.len(), 2);
        assert!(repos.contains(&dir.path().join("outer")));
        assert!(repos.contains(&dir.path().join("sibling")));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nowhere");

        assert!(discover_repositories(&[missing], None).is_err());
    }

    #[test]
    fn empty_root_finds_nothing() {
        let dir = tempdir().unwrap();
        let repos = discover_repositories(&[dir.path().to_path_buf()], None).unwrap();
        assert!(repos.is_empty());
    }
}
