//! # Lighthouse Execution
//!
//! Handles execution of the `lighthouse` command for a single URL.

use crate::audit::error::AuditError;
use crate::audit::producer::{AuditedReport, ReportProducer};
use crate::config::AuditConfig;
use crate::constants::{
    CHROME_HEADLESS_FLAG, LIGHTHOUSE_BASE_ARGS, LIGHTHOUSE_CHROME_FLAGS_ARG,
    LIGHTHOUSE_DESKTOP_ARG,
};
use crate::observability;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Runs the audit tool as a child process, one URL at a time
#[derive(Debug, Clone)]
pub struct LighthouseRunner {
    program: String,
    chrome_flags: String,
    desktop: bool,
    timeout: Option<Duration>,
}

impl LighthouseRunner {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            program: config.lighthouse_bin.clone(),
            chrome_flags: config.chrome_flags.clone(),
            desktop: config.desktop,
            timeout: config.timeout,
        }
    }

    /// Arguments passed to the tool for `url`, the URL always last
    pub fn command_args(&self, url: &str) -> Vec<String> {
        let mut args: Vec<String> = LIGHTHOUSE_BASE_ARGS
            .iter()
            .map(|arg| (*arg).to_string())
            .collect();
        args.push(format!(
            "{LIGHTHOUSE_CHROME_FLAGS_ARG}={}",
            compose_chrome_flags(&self.chrome_flags)
        ));
        if self.desktop {
            args.push(LIGHTHOUSE_DESKTOP_ARG.to_string());
        }
        args.push(url.to_string());
        args
    }

    /// Run the tool and return its standard output
    ///
    /// # Errors
    ///
    /// Fails if the tool cannot be found or started, runs past the timeout,
    /// exits with a non-zero status (the error carries the captured stderr) or
    /// writes anything but UTF-8 to stdout.
    pub async fn run(&self, url: &str) -> Result<String, AuditError> {
        let program = which::which(&self.program).map_err(|source| AuditError::ToolNotFound {
            program: self.program.clone(),
            source,
        })?;

        let args = self.command_args(url);
        debug!("Executing: {} {}", program.display(), args.join(" "));

        let mut cmd = tokio::process::Command::new(&program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let started = Instant::now();
        let output = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, cmd.output()).await {
                Ok(output) => output,
                Err(_elapsed) => {
                    error!("Lighthouse did not finish within {}s for {}", timeout.as_secs(), url);
                    return Err(AuditError::TimedOut {
                        url: url.to_string(),
                        timeout,
                    });
                }
            },
            None => cmd.output().await,
        }
        .map_err(|source| AuditError::Spawn {
            url: url.to_string(),
            source,
        })?;
        observability::metrics::observe_audit_duration(started.elapsed().as_secs_f64());

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!("Lighthouse failed for {} ({}): {}", url, output.status, stderr);
            return Err(AuditError::Failed {
                url: url.to_string(),
                status: output.status,
                stderr,
            });
        }

        info!(
            "Lighthouse finished for {} in {:.1}s ({} bytes of output)",
            url,
            started.elapsed().as_secs_f64(),
            output.stdout.len()
        );
        // Kept byte for byte: this text is parsed and cached as is
        String::from_utf8(output.stdout).map_err(|source| {
            error!("Lighthouse output for {} is not valid UTF-8", url);
            AuditError::NonUtf8Output {
                url: url.to_string(),
                source,
            }
        })
    }
}

#[async_trait]
impl ReportProducer for LighthouseRunner {
    async fn produce(&self, url: &str) -> Result<AuditedReport, AuditError> {
        observability::metrics::increment_audits_total();
        let result = match self.run(url).await {
            Ok(stdout) => AuditedReport::parse(url, stdout),
            Err(e) => Err(e),
        };
        if result.is_err() {
            observability::metrics::increment_audit_errors_total();
        }
        result
    }
}

/// Value of `--chrome-flags`: headless first, then the caller's extra flags
fn compose_chrome_flags(extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        CHROME_HEADLESS_FLAG.to_string()
    } else {
        format!("{CHROME_HEADLESS_FLAG} {extra}")
    }
}
