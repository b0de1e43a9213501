//! Confirmation gate for large fetches
//!
//! Before walking a collection that holds more than [`LARGE_FETCH_THRESHOLD`]
//! items, the user is asked whether to continue. A running status spinner is
//! paused for the prompt and resumed if the user agrees.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use dialoguer::Confirm;
use log::debug;
use tokio::sync::mpsc;

use crate::output::StatusSignal;

/// Collections larger than this need confirmation.
pub const LARGE_FETCH_THRESHOLD: usize = 50;

/// Time given to the spinner to clear its line before the prompt is shown.
const PAUSE_GRACE: Duration = Duration::from_millis(50);

/// Decides whether a large fetch may proceed.
///
/// Any `Fn(&str) -> bool` closure is a policy, which is how tests inject
/// canned answers.
pub trait ConfirmPolicy: Send + Sync {
    /// Ask the question in `prompt`; true means "go ahead".
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> ConfirmPolicy for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Interactive policy that asks on the terminal.
///
/// With both stdin and stderr attached to a terminal a single keypress
/// answers (`y`/`Y` is yes, escape or interrupt is no). Otherwise a full
/// line is read from stdin and `y`/`yes` in any case is yes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl ConfirmPolicy for TerminalPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        let stderr_is_tty = io::stderr().is_terminal();
        let stdin_is_tty = io::stdin().is_terminal();

        if stderr_is_tty {
            eprint!("\r\x1b[K");
        } else {
            eprintln!();
        }

        if stdin_is_tty && stderr_is_tty {
            let answer = Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .wait_for_newline(false)
                .interact_opt();
            match answer {
                Ok(Some(confirmed)) => confirmed,
                Ok(None) => false,
                Err(e) => {
                    debug!("Reading confirmation key failed: {}", e);
                    false
                }
            }
        } else {
            eprint!("{} (y/n): ", prompt);
            let _ = io::stderr().flush();
            read_line_confirmation(&mut io::stdin().lock())
        }
    }
}

/// Read one line and accept `y`/`yes` case-insensitively. Read errors and
/// end of input count as "no".
pub fn read_line_confirmation(reader: &mut impl BufRead) -> bool {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => false,
        Ok(_) => is_affirmative(&line),
        Err(e) => {
            eprintln!("\nError reading input line: {}", e);
            false
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Threshold check plus policy, with spinner pause/resume signalling.
pub struct ConfirmationGate {
    policy: Arc<dyn ConfirmPolicy>,
    status: Option<mpsc::Sender<StatusSignal>>,
    threshold: usize,
}

impl ConfirmationGate {
    /// Create a gate with the fixed threshold and no spinner attached.
    pub fn new(policy: Arc<dyn ConfirmPolicy>) -> Self {
        Self {
            policy,
            status: None,
            threshold: LARGE_FETCH_THRESHOLD,
        }
    }

    /// Signal pause/resume on `sender` around prompts.
    pub fn with_status_channel(mut self, sender: mpsc::Sender<StatusSignal>) -> Self {
        self.status = Some(sender);
        self
    }

    /// Returns true if fetching `count` items of `description` may proceed.
    ///
    /// Counts at or below the threshold pass without asking. A declined
    /// prompt leaves the spinner paused; the caller reports the cancellation.
    pub async fn confirm_large_fetch(&self, description: &str, count: usize) -> bool {
        if count <= self.threshold {
            return true;
        }

        let paused = self.signal(StatusSignal::Pause);
        if paused {
            tokio::time::sleep(PAUSE_GRACE).await;
        }

        debug!("Large number of {} detected: {}", description, count);
        let prompt = format!(
            "This operation will fetch {} {}. Continue?",
            count, description
        );

        // The policy may block on stdin
        let policy = Arc::clone(&self.policy);
        let confirmed = tokio::task::spawn_blocking(move || policy.confirm(&prompt))
            .await
            .unwrap_or(false);

        if confirmed {
            debug!("User confirmed fetching {} {}", count, description);
            if paused {
                self.signal(StatusSignal::Resume);
            }
        } else {
            debug!(
                "User cancelled operation due to large fetch size ({} {})",
                count, description
            );
        }
        confirmed
    }

    /// Non-blocking send; a full or closed channel drops the signal.
    fn signal(&self, signal: StatusSignal) -> bool {
        let Some(sender) = &self.status else {
            return false;
        };
        match sender.try_send(signal) {
            Ok(()) => {
                debug!("Signalled status {:?}", signal);
                true
            }
            Err(e) => {
                debug!("Failed to send {:?} signal: {}", signal, e);
                false
            }
        }
    }
}
