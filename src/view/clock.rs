use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::error::TasklistError;
use crate::models::Task;

/// Wall-clock display: `"14:05"` and `"Monday, Oct 19"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockFace {
    pub time: String,
    pub date: String,
}

impl ClockFace {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            time: now.format("%H:%M").to_string(),
            date: now.format("%A, %b %-d").to_string(),
        }
    }
}

/// Local creation date shown next to each task.
pub fn created_label(task: &Task) -> String {
    task.created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d")
        .to_string()
}

/// Background timer sending the current time on a fixed interval.
///
/// The thread lives exactly as long as the handle: dropping the `Ticker`
/// stops and joins it.
#[derive(Debug)]
pub struct Ticker {
    ticks: Receiver<DateTime<Local>>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(interval: Duration) -> Result<Self, TasklistError> {
        let (tick_tx, ticks) = mpsc::channel();
        let (stop, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("clock-tick".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if tick_tx.send(Local::now()).is_err() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| TasklistError::terminal(format!("failed to start clock: {e}")))?;
        debug!(interval_ms = interval.as_millis() as u64, "clock started");
        Ok(Self {
            ticks,
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Most recent pending tick, if any arrived since the last call.
    pub fn latest(&self) -> Option<DateTime<Local>> {
        self.ticks.try_iter().last()
    }

    pub fn wait(&self, timeout: Duration) -> Option<DateTime<Local>> {
        self.ticks.recv_timeout(timeout).ok()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("clock stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
