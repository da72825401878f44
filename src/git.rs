use crate::errors::{ConcatError, FileError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, trace, warn};

/// Hard ceiling for any single git invocation. No retry on timeout.
pub const GIT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// The two version-control operations the engine needs. Kept behind a trait so
/// tests can substitute a fake without spawning processes.
#[async_trait]
pub trait VersionControlClient: Send + Sync {
    /// Repository root enclosing `dir`, or `None` when `dir` is not inside a
    /// repository (including when the command is unavailable).
    async fn repo_root(&self, dir: &Path) -> Result<Option<PathBuf>, ConcatError>;

    /// All tracked paths of the repository at `root`, relative to `root`.
    async fn tracked_set(&self, root: &Path) -> Result<HashSet<PathBuf>, ConcatError>;
}

/// Real client backed by the `git` executable.
pub struct GitClient;

#[async_trait]
impl VersionControlClient for GitClient {
    async fn repo_root(&self, dir: &Path) -> Result<Option<PathBuf>, ConcatError> {
        // Non-zero exit means "not a repository"; a timeout or spawn failure
        // degrades the same way. None of these abort the run.
        match run_git(dir, &["rev-parse", "--show-toplevel"]).await {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                Ok(Some(PathBuf::from(stdout.trim())))
            }
            Ok(_) => {
                trace!("{} is not inside a git repository", dir.display());
                Ok(None)
            }
            Err(e) => {
                debug!("Repository lookup failed for {}: {}", dir.display(), e);
                Ok(None)
            }
        }
    }

    async fn tracked_set(&self, root: &Path) -> Result<HashSet<PathBuf>, ConcatError> {
        let output = run_git(root, &["ls-files"]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConcatError::VcsError(format!(
                "git ls-files failed in {}: {}",
                root.display(),
                stderr.trim()
            )));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}

async fn run_git(cwd: &Path, args: &[&str]) -> Result<Output, ConcatError> {
    trace!("Running git {} in {}", args.join(" "), cwd.display());
    let mut command = Command::new("git");
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    match timeout(GIT_COMMAND_TIMEOUT, command.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(ConcatError::VcsError(format!(
            "failed to run git {}: {}",
            args.join(" "),
            e
        ))),
        Err(_) => Err(ConcatError::VcsError(format!(
            "git {} timed out after {:?}",
            args.join(" "),
            GIT_COMMAND_TIMEOUT
        ))),
    }
}

/// Answers "is this file tracked?" while keeping external invocations to a
/// minimum: repository roots are cached per containing directory, and the full
/// tracked set is fetched once per repository. One resolver serves exactly one
/// run; tracked state may change between runs, so resolvers are never reused.
pub struct TrackedFilesResolver {
    client: Box<dyn VersionControlClient>,
    repo_roots: HashMap<PathBuf, Option<PathBuf>>,
    tracked_sets: HashMap<PathBuf, HashSet<PathBuf>>,
    warnings: Vec<FileError>,
}

impl TrackedFilesResolver {
    pub fn new() -> Self {
        Self::with_client(Box::new(GitClient))
    }

    pub fn with_client(client: Box<dyn VersionControlClient>) -> Self {
        TrackedFilesResolver {
            client,
            repo_roots: HashMap::new(),
            tracked_sets: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Resolves the repository root for `path`, caching by its containing
    /// directory. A negative answer is cached too.
    pub async fn repo_root_for(&mut self, path: &Path) -> Option<PathBuf> {
        let dir = path.parent().unwrap_or(path).to_path_buf();
        if let Some(cached) = self.repo_roots.get(&dir) {
            return cached.clone();
        }
        let resolved = match self.client.repo_root(&dir).await {
            Ok(root) => root,
            Err(e) => {
                debug!("Repository lookup failed for {}: {}", dir.display(), e);
                None
            }
        };
        self.repo_roots.insert(dir, resolved.clone());
        resolved
    }

    /// Tracked check. Files outside any repository are untracked, not errors.
    /// A failing `ls-files` is recorded as a run warning, cached as an empty
    /// set so the repository is queried only once, and treated as untracked.
    pub async fn is_tracked(&mut self, path: &Path) -> bool {
        let root = match self.repo_root_for(path).await {
            Some(root) => root,
            None => return false,
        };
        if !self.tracked_sets.contains_key(&root) {
            let set = match self.client.tracked_set(&root).await {
                Ok(set) => set,
                Err(e) => {
                    warn!("Failed to list tracked files for {}: {}", root.display(), e);
                    self.warnings.push(FileError {
                        path: root.clone(),
                        reason: e.to_string(),
                    });
                    HashSet::new()
                }
            };
            self.tracked_sets.insert(root.clone(), set);
        }
        let tracked = &self.tracked_sets[&root];
        path.strip_prefix(&root)
            .map(|rel| tracked.contains(rel))
            .unwrap_or(false)
    }

    /// Drains accumulated non-fatal VCS failures into the run's error report.
    pub fn take_warnings(&mut self) -> Vec<FileError> {
        std::mem::take(&mut self.warnings)
    }
}

impl Default for TrackedFilesResolver {
    fn default() -> Self {
        Self::new()
    }
}
