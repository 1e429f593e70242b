//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event Loop
//!
//! Merges three sources into a single stream of [`Action`]s:
//! - terminal events (keys, resizes)
//! - results of background submit tasks
//! - a tick used to expire notifications

use std::time::{Duration, Instant};

use crossterm::event::{Event as TermEvent, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::client::outcome::SubmitOutcome;
use crate::controller::actions::Action;
use crate::controller::keymap::map_key;
use crate::model::form_record::FieldName;

pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Result reported by a background task.
#[derive(Debug, Clone)]
pub enum TaskResult {
    SubmitFinished {
        submission_id: u64,
        outcome: SubmitOutcome,
    },
}

impl From<TaskResult> for Action {
    fn from(result: TaskResult) -> Self {
        match result {
            TaskResult::SubmitFinished {
                submission_id,
                outcome,
            } => Action::SubmitFinished {
                submission_id,
                outcome,
            },
        }
    }
}

/// Counters reported when the loop shuts down.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnap {
    pub terminal_events: u64,
    pub tasks: u64,
    pub ticks: u64,
    pub avg: Duration,
}

pub struct EventLoop {
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    event_stream: EventStream,
    tick: Interval,
    metrics: MetricsSnap,
    started: Instant,
}

/// Maps one terminal event; `None` for events the form ignores.
pub fn translate_terminal_event(event: TermEvent, focus: FieldName) -> Option<Action> {
    match event {
        TermEvent::Key(key) => match map_key(key, focus) {
            Action::NoOp => None,
            action => Some(action),
        },
        TermEvent::Resize(width, height) => Some(Action::Resize(width, height)),
        _ => None,
    }
}

impl EventLoop {
    pub fn new(task_rx: mpsc::UnboundedReceiver<TaskResult>) -> Self {
        info!("Initializing event loop");
        let mut tick = time::interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            task_rx,
            event_stream: EventStream::new(),
            tick,
            metrics: MetricsSnap::default(),
            started: Instant::now(),
        }
    }

    /// Waits for the next action. Returns `Action::Quit` once the terminal
    /// event stream has ended.
    pub async fn next_action(&mut self, focus: FieldName) -> Action {
        loop {
            tokio::select! {
                maybe_event = self.event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            self.metrics.terminal_events += 1;
                            trace!("Terminal event received: {:?}", event);
                            if let Some(action) = translate_terminal_event(event, focus) {
                                debug!("Terminal event mapped to action: {:?}", action);
                                return action;
                            }
                        }
                        Some(Err(e)) => {
                            warn!(error = %e, "Terminal event stream error");
                        }
                        None => {
                            info!("Terminal event stream closed");
                            return Action::Quit;
                        }
                    }
                }

                Some(result) = self.task_rx.recv() => {
                    self.metrics.tasks += 1;
                    return result.into();
                }

                _ = self.tick.tick() => {
                    self.metrics.ticks += 1;
                    return Action::Tick;
                }
            }
        }
    }

    pub fn snapshot_metrics(&self) -> MetricsSnap {
        let handled = self.metrics.terminal_events + self.metrics.tasks + self.metrics.ticks;
        let avg = if handled == 0 {
            Duration::ZERO
        } else {
            self.started.elapsed() / handled.min(u32::MAX as u64) as u32
        };
        MetricsSnap { avg, ..self.metrics }
    }
}
