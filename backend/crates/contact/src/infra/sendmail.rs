//! Sendmail Transport
//!
//! Pipes the rendered message into a local `sendmail`-compatible binary
//! (`sendmail -t -i`: recipients from headers, lone dots are literal).

use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::mail::OutgoingMail;
use crate::domain::repository::{MailError, MailTransport};

pub const DEFAULT_SENDMAIL_PATH: &str = "/usr/sbin/sendmail";

/// Mail transport backed by the system MTA
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    program: PathBuf,
}

impl SendmailTransport {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SENDMAIL_PATH)
    }
}

impl MailTransport for SendmailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let mut child = Command::new(&self.program)
            .arg("-t")
            .arg("-i")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                MailError::with_warning(format!("failed to start {}: {e}", self.program.display()))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A closed pipe means the child already exited; its status decides.
            match stdin.write_all(mail.to_rfc5322().as_bytes()).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => {
                    return Err(MailError::with_warning(format!(
                        "failed to write message: {e}"
                    )));
                }
            }
            // Dropping stdin closes the pipe so sendmail sees EOF
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| MailError::with_warning(format!("failed to wait for sendmail: {e}")))?;

        if output.status.success() {
            tracing::debug!(to = %mail.to, "Mail handed to sendmail");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let warning = if stderr.is_empty() {
            format!("sendmail exited with {}", output.status)
        } else {
            stderr
        };
        Err(MailError::with_warning(warning))
    }
}
