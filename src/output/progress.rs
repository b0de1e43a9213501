//! Terminal status line
//!
//! A spinner runs on its own task and repaints every 100ms. The confirmation
//! gate pauses it through a single-slot channel before prompting and resumes
//! it afterwards; stopping is signalled separately.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_millis(100);
const TICK_STRINGS: &[&str] = &["|", "/", "-", "\\", " "];

/// Control messages for a running spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSignal {
    /// Clear the line and stop repainting
    Pause,
    /// Start repainting again
    Resume,
}

/// How status messages reach the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMode {
    /// Animated spinner on stderr
    Spinner,
    /// One `message...` line per status, for pipes
    Plain,
    /// Nothing shown; debug logging covers progress
    Silent,
    /// Spinner task with nothing drawn
    #[cfg(test)]
    Hidden,
}

impl StatusMode {
    /// Spinner on an interactive stderr, nothing while debug logging is on.
    pub fn detect(debug: bool) -> Self {
        if debug {
            StatusMode::Silent
        } else if io::stderr().is_terminal() {
            StatusMode::Spinner
        } else {
            StatusMode::Plain
        }
    }
}

/// A status message on screen until stopped.
pub struct StatusIndicator {
    state: IndicatorState,
}

enum IndicatorState {
    Idle(Option<mpsc::Receiver<StatusSignal>>),
    Running {
        stop: oneshot::Sender<()>,
        task: JoinHandle<Option<mpsc::Receiver<StatusSignal>>>,
    },
}

impl StatusIndicator {
    /// Show `message` in the given mode, listening on `signals` if any.
    pub fn start(
        message: &str,
        signals: Option<mpsc::Receiver<StatusSignal>>,
        mode: StatusMode,
    ) -> Self {
        let draw = match mode {
            StatusMode::Plain => {
                eprintln!("{}...", message);
                return Self {
                    state: IndicatorState::Idle(signals),
                };
            }
            StatusMode::Silent => {
                return Self {
                    state: IndicatorState::Idle(signals),
                };
            }
            StatusMode::Spinner => true,
            #[cfg(test)]
            StatusMode::Hidden => false,
        };

        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(animate(message.to_string(), signals, stopped, draw));
        Self {
            state: IndicatorState::Running { stop, task },
        }
    }

    /// Clear the line and hand the signal receiver back.
    pub async fn stop(self) -> Option<mpsc::Receiver<StatusSignal>> {
        match self.state {
            IndicatorState::Idle(signals) => signals,
            IndicatorState::Running { stop, task } => {
                let _ = stop.send(());
                match task.await {
                    Ok(signals) => signals,
                    Err(e) => {
                        debug!("Status task ended abnormally: {}", e);
                        None
                    }
                }
            }
        }
    }
}

fn spinner(message: &str, draw: bool) -> ProgressBar {
    let bar = if draw {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    let style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .map(|style| style.tick_strings(TICK_STRINGS))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar
}

async fn animate(
    message: String,
    mut signals: Option<mpsc::Receiver<StatusSignal>>,
    mut stopped: oneshot::Receiver<()>,
    draw: bool,
) -> Option<mpsc::Receiver<StatusSignal>> {
    let mut bar = Some(spinner(&message, draw));
    let mut ticker = tokio::time::interval(TICK);
    let mut listening = signals.is_some();

    loop {
        tokio::select! {
            _ = &mut stopped => break,
            signal = recv(&mut signals), if listening => match signal {
                Some(StatusSignal::Pause) => {
                    if let Some(bar) = bar.take() {
                        bar.finish_and_clear();
                    }
                }
                Some(StatusSignal::Resume) => {
                    if bar.is_none() {
                        bar = Some(spinner(&message, draw));
                    }
                }
                None => listening = false,
            },
            _ = ticker.tick() => {
                if let Some(bar) = &bar {
                    bar.tick();
                }
            }
        }
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    signals
}

async fn recv(signals: &mut Option<mpsc::Receiver<StatusSignal>>) -> Option<StatusSignal> {
    match signals {
        Some(rx) => rx.recv().await,
        None => None,
    }
}

/// Sequence of status messages sharing one pause/resume channel.
pub struct StatusLine {
    mode: StatusMode,
    idle: Option<mpsc::Receiver<StatusSignal>>,
    active: Option<StatusIndicator>,
}

impl StatusLine {
    pub fn new(signals: mpsc::Receiver<StatusSignal>, mode: StatusMode) -> Self {
        Self {
            mode,
            idle: Some(signals),
            active: None,
        }
    }

    /// Replace the current status message.
    pub async fn show(&mut self, message: &str) {
        self.clear().await;
        let signals = self.idle.take();
        self.active = Some(StatusIndicator::start(message, signals, self.mode));
    }

    /// Remove the status message, if any.
    pub async fn clear(&mut self) {
        if let Some(indicator) = self.active.take() {
            self.idle = indicator.stop().await;
        }
    }
}
