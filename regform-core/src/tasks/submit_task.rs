//! ``src/tasks/submit_task.rs``
//! ============================================================================
//! # Background Submit Task
//!
//! Runs one registration request off the UI loop and reports back through the
//! task channel.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use crate::client::registration_client::RegistrationSink;
use crate::controller::event_loop::TaskResult;
use crate::model::form_record::FormRecord;

/// Spawn a task that submits `record` and sends the outcome on `task_tx`.
pub fn spawn_submit(
    sink: Arc<dyn RegistrationSink>,
    submission_id: u64,
    record: FormRecord,
    task_tx: mpsc::UnboundedSender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(submission_id, "Submitting registration");

        let outcome = sink.submit(&record).await;

        if task_tx
            .send(TaskResult::SubmitFinished {
                submission_id,
                outcome,
            })
            .is_err()
        {
            warn!(submission_id, "Event loop gone before submit result arrived");
        }
    })
}
