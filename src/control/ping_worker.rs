use crate::control::{
    control_channel::ControlChannel, control_error::ControlError, data_channel::DataChannel,
};
use crate::log::log_sink::LogSink;
use crate::{sink_error, sink_info, sink_warn};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

const STOP_POLL: Duration = Duration::from_millis(20);

/// Sends a ping on the control channel every `interval` from a background thread.
///
/// The thread exits when stopped or when the channel reports it is closed.
pub struct PingWorker {
    run: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl PingWorker {
    #[must_use]
    pub fn spawn<C>(
        control: Arc<Mutex<ControlChannel<C>>>,
        interval: Duration,
        log_sink: Arc<dyn LogSink>,
    ) -> Self
    where
        C: DataChannel + Send + 'static,
    {
        let run = Arc::new(AtomicBool::new(true));
        let run2 = Arc::clone(&run);
        let sink = Arc::clone(&log_sink);

        let handle = thread::Builder::new()
            .name("ping-worker".into())
            .spawn(move || {
                let mut next = Instant::now() + interval;
                while run2.load(Ordering::SeqCst) {
                    if Instant::now() < next {
                        thread::sleep(STOP_POLL.min(next.saturating_duration_since(Instant::now())));
                        continue;
                    }
                    next += interval;

                    let Ok(mut cc) = control.lock() else {
                        sink_error!(sink, "[PING] control channel lock poisoned");
                        break;
                    };
                    match cc.tick() {
                        Ok(()) => {}
                        Err(ControlError::Closed) => break,
                        Err(e) => sink_warn!(sink, "[PING] send failed: {}", e),
                    }
                }
                sink_info!(sink, "[PING] worker exiting");
            });

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                sink_error!(log_sink, "[PING] failed to spawn worker: {}", e);
                None
            }
        };
        Self { run, handle }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        self.run.store(false, Ordering::SeqCst);
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

impl Drop for PingWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
