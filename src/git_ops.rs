use anyhow::{Context, Result, anyhow};
use git2::{Repository, Signature, Time};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing::{debug, info};

/// Commits the task file to the git repository that contains it
///
/// When the file is not inside a repository every operation is a no-op.
/// The repository is looked up on first use, so the directory holding the
/// file may be created after construction.
pub struct GitOps {
    dir: PathBuf,
    repo: OnceLock<Option<Mutex<Repository>>>,
}

impl GitOps {
    /// Prepare to look for a repository at or above the directory holding `file_path`
    pub fn new(file_path: &Path) -> Self {
        let dir = match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        Self {
            dir,
            repo: OnceLock::new(),
        }
    }

    fn repo(&self) -> Option<&Mutex<Repository>> {
        self.repo
            .get_or_init(|| {
                let repo = Repository::discover(&self.dir).ok().map(Mutex::new);
                if repo.is_none() {
                    debug!(dir = %self.dir.display(), "task file is not inside a git repository");
                }
                repo
            })
            .as_ref()
    }

    pub fn is_git_managed(&self) -> bool {
        self.repo().is_some()
    }

    /// Stage `file_path` and commit it
    ///
    /// Returns `false` without committing when the staged tree equals HEAD's.
    pub fn commit(&self, file_path: &Path, message: &str) -> Result<bool> {
        let Some(repo) = self.repo() else {
            return Ok(false);
        };
        let repo = repo
            .lock()
            .map_err(|_| anyhow!("git repository lock poisoned"))?;

        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?
            .canonicalize()?;
        let absolute = file_path
            .canonicalize()
            .with_context(|| format!("Task file {} not found", file_path.display()))?;
        let relative = absolute
            .strip_prefix(&workdir)
            .context("Task file is not inside the repository")?;

        let mut index = repo.index()?;
        index.add_path(relative)?;
        index.write()?;
        let tree = repo.find_tree(index.write_tree()?)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        if let Some(ref commit) = parent
            && commit.tree_id() == tree.id()
        {
            debug!("task file unchanged, nothing to commit");
            return Ok(false);
        }

        let signature = Self::signature(&repo)?;
        let parents: Vec<_> = parent.iter().collect();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        info!(commit_message = message, "committed task file");
        Ok(true)
    }

    /// Push the current branch to `origin`, skipped when there is no such remote
    pub fn push(&self) -> Result<()> {
        let Some(repo) = self.repo() else {
            return Ok(());
        };
        let repo = repo
            .lock()
            .map_err(|_| anyhow!("git repository lock poisoned"))?;

        let Ok(mut remote) = repo.find_remote("origin") else {
            debug!("no 'origin' remote, skipping push");
            return Ok(());
        };

        let head = repo.head().context("Failed to get HEAD")?;
        let branch = head.shorthand().context("Failed to get branch name")?;
        let refspec = format!("refs/heads/{}", branch);
        remote
            .push(&[&refspec], None)
            .with_context(|| format!("Failed to push {} to origin", branch))?;
        info!(branch, "pushed task file history");
        Ok(())
    }

    /// Commit then push
    pub fn sync(&self, file_path: &Path, message: &str) -> Result<()> {
        if self.commit(file_path, message)? {
            self.push()?;
        }
        Ok(())
    }

    fn signature(repo: &Repository) -> Result<Signature<'static>> {
        let config = repo.config()?;
        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "Task Dashboard".to_string());
        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "task-dashboard@localhost".to_string());

        // Some CI machines cannot read the clock for signatures
        match Signature::now(&name, &email) {
            Ok(signature) => Ok(signature),
            Err(_) => Signature::new(&name, &email, &Time::new(1_700_000_000, 0))
                .context("Failed to create commit signature"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // テスト用のgitリポジトリを初期化
    fn setup_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        (temp_dir, repo)
    }

    fn head_message(repo: &Repository) -> String {
        let commit = repo.head().unwrap().peel_to_commit().unwrap();
        commit.message().unwrap().to_string()
    }

    // git管理外のディレクトリでは何もしない
    #[test]
    fn test_non_git_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.csv");
        fs::write(&file_path, "id\n").unwrap();

        let git_ops = GitOps::new(&file_path);
        assert!(!git_ops.is_git_managed());
        assert!(!git_ops.commit(&file_path, "Add task").unwrap());
        assert!(git_ops.sync(&file_path, "Add task").is_ok());
    }

    // 初回コミットとメッセージの確認
    #[test]
    fn test_commit_creates_initial_commit() {
        let (temp_dir, repo) = setup_test_repo();
        let file_path = temp_dir.path().join("tasks.csv");
        fs::write(&file_path, "id,task_name\n1,Write docs\n").unwrap();

        let git_ops = GitOps::new(&file_path);
        assert!(git_ops.is_git_managed());
        assert!(git_ops.commit(&file_path, "Add task Write docs").unwrap());
        assert_eq!(head_message(&repo), "Add task Write docs");
    }

    // 変更がない場合はコミットしない
    #[test]
    fn test_commit_skips_unchanged_file() {
        let (temp_dir, repo) = setup_test_repo();
        let file_path = temp_dir.path().join("tasks.csv");
        fs::write(&file_path, "id\n").unwrap();

        let git_ops = GitOps::new(&file_path);
        assert!(git_ops.commit(&file_path, "first").unwrap());
        assert!(!git_ops.commit(&file_path, "second").unwrap());
        assert_eq!(head_message(&repo), "first");
    }

    // 作成前のディレクトリでも最初の使用時にリポジトリを探す
    #[test]
    fn test_discovers_repository_after_directory_is_created() {
        let (temp_dir, repo) = setup_test_repo();
        let data_dir = temp_dir.path().join("data");
        let file_path = data_dir.join("tasks.csv");

        let git_ops = GitOps::new(&file_path);
        fs::create_dir_all(&data_dir).unwrap();
        fs::write(&file_path, "id\n").unwrap();

        assert!(git_ops.commit(&file_path, "Add task").unwrap());
        assert_eq!(head_message(&repo), "Add task");
    }

    // originが無い場合のsyncはコミットのみ
    #[test]
    fn test_sync_without_remote_commits_only() {
        let (temp_dir, repo) = setup_test_repo();
        let file_path = temp_dir.path().join("tasks.csv");
        fs::write(&file_path, "id\n1\n").unwrap();

        let git_ops = GitOps::new(&file_path);
        git_ops.sync(&file_path, "Import tasks").unwrap();
        assert_eq!(head_message(&repo), "Import tasks");
    }
}
