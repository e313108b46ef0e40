use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Builds and runs `git shortlog -nse` for one repository.
///
/// `-nse` sorts by commit count and prints one author per line as
/// `<count>\t<name> <email-in-angle-brackets>`, which is exactly the input
/// contract of the aggregation core.
#[derive(Debug, Clone)]
pub struct ShortlogCommand {
    after: Option<NaiveDate>,
    include_merges: bool,
}

impl ShortlogCommand {
    pub fn new(after: Option<NaiveDate>, include_merges: bool) -> Self {
        Self {
            after,
            include_merges,
        }
    }

    pub(crate) fn args(&self, repo: &Path) -> Vec<String> {
        let mut args = vec![
            "-C".to_string(),
            repo.display().to_string(),
            "shortlog".to_string(),
            "-nse".to_string(),
        ];
        if !self.include_merges {
            args.push("--no-merges".to_string());
        }
        if let Some(after) = self.after {
            args.push(format!("--after={}", after.format("%Y-%m-%d")));
        }
        args.push("HEAD".to_string());
        args
    }

    /// Collect the shortlog output lines for one repository.
    ///
    /// A repository whose shortlog exits non-zero (unborn HEAD, nothing in
    /// the date range) yields no lines and the run continues; only a git
    /// binary that cannot be spawned is a hard error. The child is always
    /// reaped before this returns.
    pub fn lines(&self, repo: &Path) -> Result<Vec<String>> {
        let args = self.args(repo);
        debug!("Running git {}", args.join(" "));

        let mut child = Command::new("git")
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .stdin(Stdio::null())
            .spawn()
            .context("Failed to spawn git; is it installed and on PATH?")?;

        let stdout = child
            .stdout
            .take()
            .context("Child process stdout was not captured")?;

        let mut lines = Vec::new();
        let mut read_error = None;
        for line in BufReader::new(stdout).lines() {
            match line {
                Ok(line) => lines.push(line),
                Err(err) => {
                    read_error = Some(err);
                    break;
                }
            }
        }

        // reap the child before surfacing any read error
        let status = child
            .wait()
            .context("Failed to wait for git shortlog")?;

        if let Some(err) = read_error {
            return Err(err).with_context(|| {
                format!("Failed to read shortlog output for {}", repo.display())
            });
        }

        if !status.success() {
            warn!(
                "git shortlog exited with {} for {}, treating as empty",
                status,
                repo.display()
            );
            return Ok(Vec::new());
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_args_exclude_merges() {
        let cmd = ShortlogCommand::new(None, false);
        let args = cmd.args(&PathBuf::from("/tmp/repo"));

        assert_eq!(args[0], "-C");
        assert_eq!(args[1], "/tmp/repo");
        assert_eq!(args[2], "shortlog");
        assert_eq!(args[3], "-nse");
        assert!(args.contains(&"--no-merges".to_string()));
        assert_eq!(args.last().unwrap(), "HEAD");
    }

    #[test]
    fn after_date_is_formatted_iso() {
        let after = NaiveDate::from_ymd_opt(2014, 2, 10).unwrap();
        let cmd = ShortlogCommand::new(Some(after), false);
        let args = cmd.args(&PathBuf::from("."));

        assert!(args.contains(&"--after=2014-02-10".to_string()));
    }

    #[test]
    fn include_merges_drops_the_no_merges_flag() {
        let cmd = ShortlogCommand::new(None, true);
        let args = cmd.args(&PathBuf::from("."));

        assert!(!args.contains(&"--no-merges".to_string()));
    }
}
