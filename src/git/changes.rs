// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Change-set construction: the content accessor for the rule engine.
//!
//! Two adapters produce the same [`ChangeSet`]: `staged_changes` for the
//! pre-commit family of hooks (HEAD tree vs. index) and `range_changes` for
//! CI (merge base of the target branch vs. the pull-request head). File
//! content stays raw bytes end to end; nothing here assumes UTF-8.

use crate::error::{AccessError, CgError, Result};
use git2::{Diff, DiffFindOptions, DiffOptions, Oid};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::repo::Repository;

/// A single line added by the commit, with its line number in the new file.
#[derive(Debug, Clone)]
pub struct AddedLine {
    /// 1-based line number in the new version of the file.
    pub number: u32,
    /// Raw line bytes, including the terminating newline when present.
    pub bytes: Vec<u8>,
}

/// Type of file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Renamed,
    Copied,
    TypeChange,
}

/// A file changed by the commit, immutable once constructed.
#[derive(Debug, Clone)]
pub struct ChangedFile {
    /// Path of the new version of the file.
    pub path: PathBuf,
    /// Type of change.
    pub kind: ChangeKind,
    /// Whether the content is binary (NUL byte heuristic).
    pub is_binary: bool,
    /// Raw content of the new version of the file.
    pub content: Vec<u8>,
    /// Lines introduced by this commit, in file order. Empty for binary
    /// files and for renames that did not touch content.
    pub added_lines: Vec<AddedLine>,
}

impl ChangedFile {
    /// Build a file record directly from parts. Used by the adapters and by
    /// tests that synthesize change-sets without a repository.
    pub fn new(
        path: impl Into<PathBuf>,
        kind: ChangeKind,
        content: Vec<u8>,
        added_lines: Vec<AddedLine>,
    ) -> Self {
        let is_binary = content.contains(&0);
        Self {
            path: path.into(),
            kind,
            is_binary,
            content,
            added_lines,
        }
    }

    /// Build an added file whose every line counts as introduced.
    pub fn added(path: impl Into<PathBuf>, content: Vec<u8>) -> Self {
        let added_lines = if content.contains(&0) {
            Vec::new()
        } else {
            split_lines(&content)
        };
        Self::new(path, ChangeKind::Added, content, added_lines)
    }
}

/// Split raw content into numbered lines, keeping line terminators.
fn split_lines(content: &[u8]) -> Vec<AddedLine> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut number = 1u32;

    for (i, byte) in content.iter().enumerate() {
        if *byte == b'\n' {
            lines.push(AddedLine {
                number,
                bytes: content[start..=i].to_vec(),
            });
            start = i + 1;
            number += 1;
        }
    }
    if start < content.len() {
        lines.push(AddedLine {
            number,
            bytes: content[start..].to_vec(),
        });
    }
    lines
}

/// Aggregate statistics over a change-set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeStats {
    /// Number of files changed.
    pub files_changed: usize,
    /// Total bytes introduced by the commit (added lines, plus whole
    /// content for binary files).
    pub total_bytes_changed: usize,
}

/// The full set of changes the engine evaluates in one pass.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    /// Changed files in diff order.
    pub files: Vec<ChangedFile>,
    /// Aggregate statistics.
    pub stats: ChangeStats,
}

impl ChangeSet {
    /// Assemble a change-set from files, computing the statistics.
    pub fn from_files(files: Vec<ChangedFile>) -> Self {
        let mut stats = ChangeStats {
            files_changed: files.len(),
            total_bytes_changed: 0,
        };
        for file in &files {
            if file.is_binary {
                stats.total_bytes_changed += file.content.len();
            } else {
                stats.total_bytes_changed +=
                    file.added_lines.iter().map(|l| l.bytes.len()).sum::<usize>();
            }
        }
        Self { files, stats }
    }
}

/// The commit message under evaluation.
#[derive(Debug, Clone)]
pub struct CommitMessage {
    /// Raw message text, comment lines already stripped.
    pub raw: String,
}

impl CommitMessage {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

/// Read a commit message from the file git hands to the commit-msg hook.
///
/// Lines starting with `#` are stripped, matching what git does with the
/// default comment character before recording the message.
pub fn read_message_file(path: &Path) -> Result<CommitMessage> {
    let bytes = std::fs::read(path).map_err(|e| {
        CgError::Access(AccessError::MessageUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    })?;

    let text = String::from_utf8_lossy(&bytes);
    let raw: String = text
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(CommitMessage::new(raw))
}

/// Get the change-set for staged changes in the current repository.
pub fn staged_changes() -> Result<ChangeSet> {
    let repo = Repository::open_current()?;
    staged_changes_in(&repo)
}

/// Get the staged change-set for a specific repository.
pub fn staged_changes_in(repo: &Repository) -> Result<ChangeSet> {
    let head_tree = repo.head_tree()?;

    let mut opts = diff_options();
    let mut diff = repo
        .inner()
        .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
        .map_err(diff_failed)?;

    collect_changes(repo, &mut diff)
}

/// Get the change-set between the merge base of `base` and `head`.
pub fn range_changes(base: &str, head: &str) -> Result<ChangeSet> {
    let repo = Repository::open_current()?;
    range_changes_in(&repo, base, head)
}

/// Get the range change-set for a specific repository.
pub fn range_changes_in(repo: &Repository, base: &str, head: &str) -> Result<ChangeSet> {
    let base_oid = repo.merge_base(base, head)?;
    let base_tree = repo
        .inner()
        .find_commit(base_oid)
        .and_then(|c| c.tree())
        .map_err(|e| {
            CgError::Access(AccessError::InvalidReference {
                reference: format!("{}: {}", base_oid, e.message()),
            })
        })?;
    let head_tree = repo.get_commit(head)?.tree().map_err(|e| {
        CgError::Access(AccessError::InvalidReference {
            reference: format!("{}: {}", head, e.message()),
        })
    })?;

    let mut opts = diff_options();
    let mut diff = repo
        .inner()
        .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))
        .map_err(diff_failed)?;

    collect_changes(repo, &mut diff)
}

fn diff_options() -> DiffOptions {
    let mut opts = DiffOptions::new();
    // Zero context so every '+' line in the patch is a line this commit
    // introduced.
    opts.context_lines(0);
    opts
}

fn diff_failed(e: git2::Error) -> CgError {
    CgError::Access(AccessError::DiffFailed {
        message: e.message().to_string(),
    })
}

/// Walk a diff into a [`ChangeSet`].
fn collect_changes(repo: &Repository, diff: &mut Diff<'_>) -> Result<ChangeSet> {
    // Rename detection, so a renamed-but-unchanged file carries zero added
    // lines instead of appearing as a wholly new file.
    diff.find_similar(Some(&mut DiffFindOptions::new()))
        .map_err(diff_failed)?;

    // First pass: file metadata in diff order.
    let mut metas: Vec<(PathBuf, ChangeKind, Oid)> = Vec::new();
    diff.foreach(
        &mut |delta, _| {
            let kind = match delta.status() {
                git2::Delta::Added => ChangeKind::Added,
                git2::Delta::Modified => ChangeKind::Modified,
                git2::Delta::Renamed => ChangeKind::Renamed,
                git2::Delta::Copied => ChangeKind::Copied,
                git2::Delta::Typechange => ChangeKind::TypeChange,
                // Deletions leave nothing to check.
                _ => return true,
            };
            if let Some(path) = delta.new_file().path() {
                metas.push((path.to_path_buf(), kind, delta.new_file().id()));
            }
            true
        },
        None,
        None,
        None,
    )
    .map_err(diff_failed)?;

    // Second pass: added lines per path.
    let mut added: HashMap<PathBuf, Vec<AddedLine>> = HashMap::new();
    diff.foreach(
        &mut |_, _| true,
        None,
        None,
        Some(&mut |delta, _hunk, line| {
            if line.origin() != '+' {
                return true;
            }
            let (Some(path), Some(number)) = (delta.new_file().path(), line.new_lineno()) else {
                return true;
            };
            added.entry(path.to_path_buf()).or_default().push(AddedLine {
                number,
                bytes: line.content().to_vec(),
            });
            true
        }),
    )
    .map_err(diff_failed)?;

    let mut files = Vec::with_capacity(metas.len());
    for (path, kind, oid) in metas {
        let content = if oid.is_zero() {
            Vec::new()
        } else {
            repo.inner()
                .find_blob(oid)
                .map(|blob| blob.content().to_vec())
                .map_err(|e| {
                    CgError::Access(AccessError::DiffFailed {
                        message: format!("cannot read blob for {}: {}", path.display(), e.message()),
                    })
                })?
        };

        let is_binary = content.contains(&0);
        let added_lines = if is_binary {
            Vec::new()
        } else {
            added.remove(&path).unwrap_or_default()
        };

        files.push(ChangedFile {
            path,
            kind,
            is_binary,
            content,
            added_lines,
        });
    }

    Ok(ChangeSet::from_files(files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository as Git2Repo;
    use tempfile::TempDir;

    fn init_repo(dir: &TempDir) -> Git2Repo {
        let repo = Git2Repo::init(dir.path()).unwrap();
        {
            let sig = git2::Signature::now("Test", "test@example.com").unwrap();
            let tree_id = {
                let mut index = repo.index().unwrap();
                index.write_tree().unwrap()
            };
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "ABC-1 Initial commit", &tree, &[])
                .unwrap();
        }
        repo
    }

    fn stage_file(repo: &Git2Repo, dir: &TempDir, name: &str, content: &[u8]) {
        std::fs::write(dir.path().join(name), content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    fn commit_index(repo: &Git2Repo, message: &str) {
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = {
            let mut index = repo.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().unwrap().peel_to_commit().unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .unwrap();
    }

    #[test]
    fn test_staged_new_file_all_lines_added() {
        let dir = TempDir::new().unwrap();
        let git = init_repo(&dir);
        stage_file(&git, &dir, "hello.py", b"print('a')\nprint('b')\n");

        let repo = Repository::open(dir.path()).unwrap();
        let changes = staged_changes_in(&repo).unwrap();

        assert_eq!(changes.files.len(), 1);
        let file = &changes.files[0];
        assert_eq!(file.path, PathBuf::from("hello.py"));
        assert_eq!(file.kind, ChangeKind::Added);
        assert!(!file.is_binary);
        assert_eq!(file.added_lines.len(), 2);
        assert_eq!(file.added_lines[0].number, 1);
        assert_eq!(file.added_lines[0].bytes, b"print('a')\n");
    }

    #[test]
    fn test_staged_modified_file_only_new_lines() {
        let dir = TempDir::new().unwrap();
        let git = init_repo(&dir);
        stage_file(&git, &dir, "a.txt", b"one\ntwo\n");
        commit_index(&git, "ABC-2 add a.txt");
        stage_file(&git, &dir, "a.txt", b"one\ntwo\nthree\n");

        let repo = Repository::open(dir.path()).unwrap();
        let changes = staged_changes_in(&repo).unwrap();

        assert_eq!(changes.files.len(), 1);
        let file = &changes.files[0];
        assert_eq!(file.kind, ChangeKind::Modified);
        assert_eq!(file.added_lines.len(), 1);
        assert_eq!(file.added_lines[0].number, 3);
        assert_eq!(file.added_lines[0].bytes, b"three\n");
        assert_eq!(file.content, b"one\ntwo\nthree\n");
    }

    #[test]
    fn test_binary_file_has_no_added_lines() {
        let dir = TempDir::new().unwrap();
        let git = init_repo(&dir);
        stage_file(&git, &dir, "blob.bin", b"\x00\x01\x02DO NOT COMMIT\x00");

        let repo = Repository::open(dir.path()).unwrap();
        let changes = staged_changes_in(&repo).unwrap();

        assert_eq!(changes.files.len(), 1);
        assert!(changes.files[0].is_binary);
        assert!(changes.files[0].added_lines.is_empty());
    }

    #[test]
    fn test_range_changes_between_commits() {
        let dir = TempDir::new().unwrap();
        let git = init_repo(&dir);
        let base = git.head().unwrap().peel_to_commit().unwrap().id().to_string();
        stage_file(&git, &dir, "b.c", b"int main() { return 0; }\n");
        commit_index(&git, "ABC-3 add b.c");

        let repo = Repository::open(dir.path()).unwrap();
        let changes = range_changes_in(&repo, &base, "HEAD").unwrap();

        assert_eq!(changes.files.len(), 1);
        assert_eq!(changes.files[0].path, PathBuf::from("b.c"));
        assert_eq!(changes.files[0].added_lines.len(), 1);
    }

    #[test]
    fn test_read_message_file_strips_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, "ABC-1 Fix parser\n# Please enter the commit message\n").unwrap();

        let message = read_message_file(&path).unwrap();
        assert_eq!(message.raw, "ABC-1 Fix parser");
    }

    #[test]
    fn test_split_lines_without_trailing_newline() {
        let lines = split_lines(b"one\ntwo");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].bytes, b"one\n");
        assert_eq!(lines[1].bytes, b"two");
        assert_eq!(lines[1].number, 2);
    }

    #[test]
    fn test_change_stats_totals() {
        let changes = ChangeSet::from_files(vec![
            ChangedFile::added("a.txt", b"hello\n".to_vec()),
            ChangedFile::added("b.bin", vec![0, 1, 2, 3]),
        ]);
        assert_eq!(changes.stats.files_changed, 2);
        assert_eq!(changes.stats.total_bytes_changed, 6 + 4);
    }
}
