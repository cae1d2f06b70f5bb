//! First-run installer.
//!
//! Runs the catalog seed and the admin bootstrap as child processes, in
//! order, and stops at the first step that fails. A database that already
//! has users is treated as installed and left alone.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::PgPool;
use timetrack_core::process::{run_command, StepInput};
use timetrack_db::repositories::UserRepo;
use tokio::process::Command;

use crate::config::{parse_or, AdminConfig};
use crate::error::{InstallError, SetupError, SetupResult};

const DEFAULT_STEP_TIMEOUT_SECS: u64 = 300;

/// One child process of the install sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    /// Label used in logs and errors.
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl InstallStep {
    /// Parse a whitespace-separated command line into a step.
    pub fn from_command_line(name: &str, command_line: &str) -> SetupResult<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| SetupError::Config(format!("Command for step '{name}' is empty")))?;
        Ok(Self {
            name: name.to_string(),
            program: PathBuf::from(program),
            args: parts.map(str::to_string).collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct InstallPlan {
    pub steps: Vec<InstallStep>,
    /// Working directory of every step; the current directory when `None`.
    pub working_directory: Option<PathBuf>,
    pub step_timeout: Duration,
    /// Where the admin step leaves its credentials, named in the final banner.
    pub credentials_file: Option<PathBuf>,
}

impl InstallPlan {
    /// Build the plan from the environment, resolving the default steps next
    /// to the running executable.
    pub fn from_env() -> SetupResult<Self> {
        let exe = std::env::current_exe()?;
        let bin_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_lookup(|key| std::env::var(key).ok(), &bin_dir)
    }

    /// | Env Var                      | Default                    |
    /// |------------------------------|----------------------------|
    /// | `INSTALL_SEED_COMMAND`       | `<bin_dir>/seed-modules`   |
    /// | `INSTALL_ADMIN_COMMAND`      | `<bin_dir>/setup-admin`    |
    /// | `INSTALL_WORKDIR`            | current directory          |
    /// | `INSTALL_STEP_TIMEOUT_SECS`  | `300`                      |
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        bin_dir: &Path,
    ) -> SetupResult<Self> {
        let step = |name: &str, key: &str, binary: &str| match lookup(key) {
            Some(command_line) => InstallStep::from_command_line(name, &command_line),
            None => Ok(InstallStep {
                name: name.to_string(),
                program: bin_dir.join(binary),
                args: Vec::new(),
            }),
        };

        let steps = vec![
            step("seed modules", "INSTALL_SEED_COMMAND", "seed-modules")?,
            step("setup admin", "INSTALL_ADMIN_COMMAND", "setup-admin")?,
        ];

        let working_directory = lookup("INSTALL_WORKDIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let timeout_secs = parse_or(&lookup, "INSTALL_STEP_TIMEOUT_SECS", DEFAULT_STEP_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(SetupError::Config(
                "INSTALL_STEP_TIMEOUT_SECS must be at least 1".into(),
            ));
        }

        Ok(Self {
            steps,
            working_directory,
            step_timeout: Duration::from_secs(timeout_secs),
            credentials_file: AdminConfig::from_lookup(&lookup).credentials_file,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Users exist already; no step was run.
    AlreadyInstalled { user_count: i64 },
    Installed { steps_run: usize },
}

/// Run the install sequence unless the database already has users.
pub async fn install(pool: &PgPool, plan: &InstallPlan) -> SetupResult<InstallOutcome> {
    let user_count = UserRepo::count(pool).await?;
    if user_count > 0 {
        tracing::info!(user_count, "Users already exist, installation skipped");
        return Ok(InstallOutcome::AlreadyInstalled { user_count });
    }

    let steps_run = run_steps(plan).await?;
    log_next_steps(plan);
    Ok(InstallOutcome::Installed { steps_run })
}

/// Run every step in order. The first failure aborts the sequence.
pub async fn run_steps(plan: &InstallPlan) -> Result<usize, InstallError> {
    let total = plan.steps.len();
    for (index, step) in plan.steps.iter().enumerate() {
        tracing::info!(
            step = %step.name,
            program = %step.program.display(),
            "Running step {}/{total}",
            index + 1
        );

        let mut cmd = Command::new(&step.program);
        cmd.args(&step.args);
        let input = StepInput {
            working_directory: plan.working_directory.clone(),
            timeout: plan.step_timeout,
            ..StepInput::default()
        };

        let output = run_command(&mut cmd, input)
            .await
            .map_err(|e| InstallError::StepFailed {
                step: step.name.clone(),
                reason: e.to_string(),
            })?;

        if !output.success() {
            return Err(InstallError::StepFailed {
                step: step.name.clone(),
                reason: format!("exited with code {}", output.exit_code),
            });
        }
        tracing::info!(step = %step.name, duration_ms = output.duration_ms, "Step completed");
    }
    Ok(total)
}

fn log_next_steps(plan: &InstallPlan) {
    tracing::info!("==================================================");
    tracing::info!("Installation complete");
    match &plan.credentials_file {
        Some(path) => {
            tracing::info!("1. Read the admin credentials in {}", path.display());
            tracing::info!("2. Log in and change the password");
            tracing::info!("3. Delete {}", path.display());
        }
        None => {
            tracing::info!("1. Log in with the admin credentials printed above");
            tracing::info!("2. Change the password");
        }
    }
    tracing::info!("==================================================");
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn sh_step(name: &str, script: &str) -> InstallStep {
        InstallStep {
            name: name.to_string(),
            program: PathBuf::from("sh"),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[test]
    fn test_default_plan_uses_sibling_binaries() {
        let plan = InstallPlan::from_lookup(lookup_from(&[]), Path::new("/opt/tt/bin")).unwrap();
        let programs: Vec<_> = plan.steps.iter().map(|s| s.program.clone()).collect();
        assert_eq!(
            programs,
            vec![
                PathBuf::from("/opt/tt/bin/seed-modules"),
                PathBuf::from("/opt/tt/bin/setup-admin"),
            ]
        );
        assert_eq!(plan.step_timeout, Duration::from_secs(300));
        assert_eq!(plan.working_directory, None);
        assert_eq!(
            plan.credentials_file,
            Some(PathBuf::from("/tmp/admin-credentials.txt"))
        );
    }

    #[test]
    fn test_command_overrides_are_split_on_whitespace() {
        let plan = InstallPlan::from_lookup(
            lookup_from(&[
                ("INSTALL_SEED_COMMAND", "cargo run -q --bin seed-modules"),
                ("INSTALL_WORKDIR", "/srv/tt"),
                ("INSTALL_STEP_TIMEOUT_SECS", "30"),
            ]),
            Path::new("/unused"),
        )
        .unwrap();
        assert_eq!(plan.steps[0].program, PathBuf::from("cargo"));
        assert_eq!(plan.steps[0].args, vec!["run", "-q", "--bin", "seed-modules"]);
        assert_eq!(plan.working_directory, Some(PathBuf::from("/srv/tt")));
        assert_eq!(plan.step_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_command_is_rejected() {
        let result = InstallPlan::from_lookup(
            lookup_from(&[("INSTALL_ADMIN_COMMAND", "   ")]),
            Path::new("/bin"),
        );
        assert_matches!(result, Err(SetupError::Config(msg)) if msg.contains("setup admin"));
    }

    #[tokio::test]
    async fn test_steps_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let plan = InstallPlan {
            steps: vec![
                sh_step("first", "echo one >> order.txt"),
                sh_step("second", "echo two >> order.txt"),
            ],
            working_directory: Some(dir.path().to_path_buf()),
            step_timeout: Duration::from_secs(10),
            credentials_file: None,
        };
        assert_eq!(run_steps(&plan).await.unwrap(), 2);
        let order = std::fs::read_to_string(dir.path().join("order.txt")).unwrap();
        assert_eq!(order, "one\ntwo\n");
    }

    #[tokio::test]
    async fn test_failing_step_stops_the_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let plan = InstallPlan {
            steps: vec![
                sh_step("seed modules", "exit 3"),
                sh_step("setup admin", "touch admin-ran"),
            ],
            working_directory: Some(dir.path().to_path_buf()),
            step_timeout: Duration::from_secs(10),
            credentials_file: None,
        };
        let result = run_steps(&plan).await;
        assert_matches!(
            result,
            Err(InstallError::StepFailed { step, reason })
                if step == "seed modules" && reason.contains("3")
        );
        assert!(!dir.path().join("admin-ran").exists());
    }

    #[tokio::test]
    async fn test_missing_program_fails_the_step() {
        let plan = InstallPlan {
            steps: vec![InstallStep {
                name: "seed modules".to_string(),
                program: PathBuf::from("/no/such/seed-modules"),
                args: Vec::new(),
            }],
            working_directory: None,
            step_timeout: Duration::from_secs(10),
            credentials_file: None,
        };
        assert_matches!(run_steps(&plan).await, Err(InstallError::StepFailed { .. }));
    }
}
