//! Render submission sink, inline or double-buffered onto a worker thread.
//!
//! The optional worker is the only cross-thread boundary in the engine:
//! strictly producer/consumer over a bounded two-slot channel, so the render
//! thread consumes one frame's immutable message batch while the simulation
//! thread produces the next. No world state is shared; the worker owns the
//! renderer backend outright. Modeled on the background audio-thread bridge
//! pattern.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use log::warn;

use crate::events::render::{RenderMessage, RendererMessage, ViewState};
use crate::resources::backends::RendererBackend;

/// One frame's worth of render submission.
pub struct FrameSubmission {
    pub view: ViewState,
    pub messages: Vec<RenderMessage>,
}

enum WorkerCmd {
    Submit(FrameSubmission),
    Swap,
    Shutdown,
}

/// Handle to the render worker thread.
pub struct RenderWorker {
    tx_cmd: Sender<WorkerCmd>,
    rx_msg: Receiver<Vec<RendererMessage>>,
    handle: std::thread::JoinHandle<()>,
}

/// Destination for render submissions.
pub enum RendererSink {
    /// Submissions call straight into the backend on the simulation thread.
    Inline(Box<dyn RendererBackend>),
    /// Submissions cross to a worker that owns the backend.
    Threaded(RenderWorker),
}

impl RendererSink {
    pub fn inline(backend: Box<dyn RendererBackend>) -> Self {
        RendererSink::Inline(backend)
    }

    /// Move `backend` onto a worker thread fed through a two-slot queue.
    pub fn threaded(mut backend: Box<dyn RendererBackend>) -> Self {
        let (tx_cmd, rx_cmd) = bounded::<WorkerCmd>(2);
        let (tx_msg, rx_msg) = unbounded::<Vec<RendererMessage>>();

        let handle = std::thread::spawn(move || {
            while let Ok(cmd) = rx_cmd.recv() {
                match cmd {
                    WorkerCmd::Submit(submission) => {
                        backend.submit(submission.view, submission.messages);
                    }
                    WorkerCmd::Swap => {
                        backend.swap();
                        let messages = backend.pop_messages();
                        if !messages.is_empty() && tx_msg.send(messages).is_err() {
                            break;
                        }
                    }
                    WorkerCmd::Shutdown => break,
                }
            }
        });

        RendererSink::Threaded(RenderWorker {
            tx_cmd,
            rx_msg,
            handle,
        })
    }

    /// Hand the frame's batch to the renderer. Blocks only when the worker
    /// is still consuming the previous frame (the two-slot backpressure).
    pub fn submit(&mut self, submission: FrameSubmission) {
        match self {
            RendererSink::Inline(backend) => {
                backend.submit(submission.view, submission.messages);
            }
            RendererSink::Threaded(worker) => {
                if worker.tx_cmd.send(WorkerCmd::Submit(submission)).is_err() {
                    warn!("render worker gone; dropping frame submission");
                }
            }
        }
    }

    /// Flip buffers and collect the renderer's outgoing messages. With a
    /// worker the messages may belong to an earlier frame; feedback is
    /// diagnostic only, so the lag is acceptable.
    pub fn swap_and_pop(&mut self) -> Vec<RendererMessage> {
        match self {
            RendererSink::Inline(backend) => {
                backend.swap();
                backend.pop_messages()
            }
            RendererSink::Threaded(worker) => {
                if worker.tx_cmd.send(WorkerCmd::Swap).is_err() {
                    warn!("render worker gone; skipping swap");
                }
                worker.rx_msg.try_iter().flatten().collect()
            }
        }
    }

    /// Stop the worker (if any) and join it. Inline sinks drop the backend.
    pub fn shutdown(self) {
        if let RendererSink::Threaded(worker) = self {
            let _ = worker.tx_cmd.send(WorkerCmd::Shutdown);
            let _ = worker.handle.join();
        }
    }
}
