use crate::git_ops::GitOps;
use crate::tasks::{TaskRecord, TaskTable};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// CSV-backed task store
///
/// Every load re-reads the whole file; every write replaces it. There is no
/// locking, so with concurrent writers the last one wins.
pub struct Storage {
    file_path: PathBuf,
    atomic_writes: bool,
    git: Option<GitOps>,
}

impl Storage {
    /// Create a store for `file_path`
    ///
    /// With `sync_git`, every write is committed to the git repository that
    /// contains the file (and pushed to `origin` when present).
    pub fn new(file_path: impl AsRef<Path>, sync_git: bool) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let git = sync_git.then(|| GitOps::new(&file_path));
        Self {
            file_path,
            atomic_writes: false,
            git,
        }
    }

    /// Write to a sibling temporary file and rename it over the task file
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load and normalize the task table; a missing file is an empty table
    pub fn load(&self) -> Result<TaskTable> {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "task file missing, using empty table");
            return Ok(TaskTable::new());
        }

        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))?;
        let table = TaskTable::from_csv(file)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        debug!(rows = table.len(), "loaded task table");
        Ok(table)
    }

    pub fn save(&self, table: &TaskTable) -> Result<()> {
        self.save_with_message(table, "Update tasks")
    }

    /// Write the whole table, then record the change in git when enabled
    pub fn save_with_message(&self, table: &TaskTable, message: &str) -> Result<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut content = Vec::new();
        table.write_csv(&mut content)?;

        if self.atomic_writes {
            let tmp_path = self.tmp_path();
            fs::write(&tmp_path, &content)
                .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
            fs::rename(&tmp_path, &self.file_path)
                .with_context(|| format!("Failed to replace {}", self.file_path.display()))?;
        } else {
            fs::write(&self.file_path, &content)
                .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        }
        info!(rows = table.len(), path = %self.file_path.display(), "saved task table");

        // The file is already written; a failed commit must not turn this into an error
        if let Some(git) = &self.git
            && let Err(e) = git.sync(&self.file_path, message)
        {
            warn!(error = %e, "git sync failed");
        }
        Ok(())
    }

    /// Load, add one record at the end, write everything back
    pub fn append(&self, record: TaskRecord) -> Result<()> {
        let mut table = self.load()?;
        let message = format!("Add task {}", record.task_name);
        table.push(record);
        self.save_with_message(&table, &message)
    }

    /// Replace the stored table with `table`
    pub fn replace_with(&self, table: &TaskTable) -> Result<()> {
        self.save_with_message(table, &format!("Import {} task(s)", table.len()))
    }

    /// Append every record of `table` to the stored table
    pub fn extend(&self, table: TaskTable) -> Result<usize> {
        let mut current = self.load()?;
        let added = table.len();
        current.records.extend(table.records);
        self.save_with_message(&current, &format!("Append {} imported task(s)", added))?;
        Ok(added)
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tasks.csv".to_string());
        self.file_path.with_file_name(format!(".{}.tmp", name))
    }
}
