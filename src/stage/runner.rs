use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::anyhow;

use crate::foundation::error::{VignetteError, VignetteResult};
use crate::playback::machine::RequestId;
use crate::playback::state::{PlaybackSnapshot, Quality};
use crate::scene::model::SceneDef;
use crate::stage::session::{ShowOutcome, Stage, StageFrame};

/// Consumer of rendered stage frames, in tick order.
pub trait StageSurface: Send {
    /// Present one frame. An error stops the runner.
    fn present(&mut self, frame: &StageFrame) -> VignetteResult<()>;
}

/// Surface that keeps every frame; clones share storage.
#[derive(Clone, Debug, Default)]
pub struct InMemorySurface {
    frames: Arc<Mutex<Vec<StageFrame>>>,
}

impl InMemorySurface {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the frames presented so far.
    pub fn frames(&self) -> Vec<StageFrame> {
        self.frames
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }

    /// Number of frames presented so far.
    pub fn len(&self) -> usize {
        self.frames.lock().map(|f| f.len()).unwrap_or(0)
    }

    /// `true` before the first frame.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StageSurface for InMemorySurface {
    fn present(&mut self, frame: &StageFrame) -> VignetteResult<()> {
        self.frames
            .lock()
            .map_err(|_| VignetteError::Other(anyhow!("in-memory surface lock poisoned")))?
            .push(frame.clone());
        Ok(())
    }
}

type Reply = mpsc::Sender<VignetteResult<ShowOutcome>>;

enum Command {
    StartShow { topic: String, reply: Reply },
    ShowLoaded {
        id: RequestId,
        result: VignetteResult<Vec<SceneDef>>,
    },
    GoTo(usize),
    Next,
    Previous,
    TogglePlay,
    SetAutoplay(bool),
    SetNarration(bool),
    SetQuality(Quality),
    SetLanguage(String),
    Snapshot(mpsc::Sender<PlaybackSnapshot>),
    Shutdown,
}

/// Runs a [`Stage`] on its own thread.
///
/// That thread is the only writer of playback state: commands, catalog results and autoplay
/// firings are all applied there in arrival order. Catalog lookups run on short-lived worker
/// threads so rendering keeps going while a show loads.
pub struct StageRunner;

impl StageRunner {
    /// Move `stage` onto a new thread that renders into `surface` at the stage's nominal rate.
    pub fn spawn(stage: Stage, surface: Box<dyn StageSurface>) -> VignetteResult<StageHandle> {
        let (tx, rx) = mpsc::channel();
        let loop_tx = tx.clone();
        let join = std::thread::Builder::new()
            .name("vignette-stage".to_owned())
            .spawn(move || run_loop(stage, surface, rx, loop_tx))
            .map_err(|e| VignetteError::Other(anyhow!("spawn stage thread: {e}")))?;
        Ok(StageHandle {
            tx,
            join: Some(join),
        })
    }
}

/// Control handle for a running stage. Dropping it shuts the stage down.
pub struct StageHandle {
    tx: mpsc::Sender<Command>,
    join: Option<JoinHandle<VignetteResult<()>>>,
}

impl StageHandle {
    /// Request a show. The receiver yields the outcome once the catalog answers.
    pub fn start_show(
        &self,
        topic: impl Into<String>,
    ) -> mpsc::Receiver<VignetteResult<ShowOutcome>> {
        let (reply, rx) = mpsc::channel();
        let topic = topic.into();
        if let Err(mpsc::SendError(Command::StartShow { reply, .. })) =
            self.tx.send(Command::StartShow { topic, reply })
        {
            let _ = reply.send(Err(stopped()));
        }
        rx
    }

    /// Activate scene `index`.
    pub fn go_to(&self, index: usize) -> VignetteResult<()> {
        self.send(Command::GoTo(index))
    }

    /// Activate the next scene.
    pub fn next(&self) -> VignetteResult<()> {
        self.send(Command::Next)
    }

    /// Activate the previous scene.
    pub fn previous(&self) -> VignetteResult<()> {
        self.send(Command::Previous)
    }

    /// Flip play/pause.
    pub fn toggle_play(&self) -> VignetteResult<()> {
        self.send(Command::TogglePlay)
    }

    /// Set the autoplay flag.
    pub fn set_autoplay(&self, on: bool) -> VignetteResult<()> {
        self.send(Command::SetAutoplay(on))
    }

    /// Set the narration flag.
    pub fn set_narration_enabled(&self, on: bool) -> VignetteResult<()> {
        self.send(Command::SetNarration(on))
    }

    /// Set the rendering level.
    pub fn set_quality(&self, quality: Quality) -> VignetteResult<()> {
        self.send(Command::SetQuality(quality))
    }

    /// Set the narration language.
    pub fn set_language(&self, language: impl Into<String>) -> VignetteResult<()> {
        self.send(Command::SetLanguage(language.into()))
    }

    /// Current playback state, read on the stage thread.
    pub fn snapshot(&self) -> VignetteResult<PlaybackSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.send(Command::Snapshot(tx))?;
        rx.recv().map_err(|_| stopped())
    }

    /// Stop the stage thread and wait for it.
    pub fn shutdown(mut self) -> VignetteResult<()> {
        self.stop()
    }

    fn send(&self, cmd: Command) -> VignetteResult<()> {
        self.tx.send(cmd).map_err(|_| stopped())
    }

    fn stop(&mut self) -> VignetteResult<()> {
        let Some(join) = self.join.take() else {
            return Ok(());
        };
        let _ = self.tx.send(Command::Shutdown);
        join.join()
            .map_err(|_| VignetteError::Other(anyhow!("stage thread panicked")))?
    }
}

impl Drop for StageHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::warn!(error = %e, "stage thread ended with error");
        }
    }
}

fn stopped() -> VignetteError {
    VignetteError::Other(anyhow!("stage runner has stopped"))
}

fn run_loop(
    mut stage: Stage,
    mut surface: Box<dyn StageSurface>,
    rx: mpsc::Receiver<Command>,
    tx: mpsc::Sender<Command>,
) -> VignetteResult<()> {
    let frame_dt = Duration::from_secs_f64(stage.tick_secs());
    let mut pending: HashMap<RequestId, Reply> = HashMap::new();
    let mut next_frame = stage.now();

    let result = loop {
        let now = stage.now();
        let wake = stage
            .next_autoplay_deadline()
            .map_or(next_frame, |d| d.min(next_frame));
        match rx.recv_timeout(wake.saturating_sub(now)) {
            Ok(Command::Shutdown) | Err(mpsc::RecvTimeoutError::Disconnected) => break Ok(()),
            Ok(cmd) => apply(&mut stage, cmd, &mut pending, &tx),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        stage.poll_autoplay();

        let now = stage.now();
        if now >= next_frame {
            let frame = match stage.tick(frame_dt.as_secs_f64()) {
                Ok(frame) => frame,
                Err(e) => break Err(e),
            };
            if let Err(e) = surface.present(&frame) {
                break Err(e);
            }
            next_frame += frame_dt;
            if next_frame <= now {
                next_frame = now + frame_dt;
            }
        }
    };

    stage.shutdown();
    for (_, reply) in pending.drain() {
        let _ = reply.send(Err(stopped()));
    }
    result
}

fn apply(
    stage: &mut Stage,
    cmd: Command,
    pending: &mut HashMap<RequestId, Reply>,
    tx: &mpsc::Sender<Command>,
) {
    match cmd {
        Command::StartShow { topic, reply } => {
            let Some(req) = stage.begin_show(&topic) else {
                let _ = reply.send(Ok(ShowOutcome::Ignored));
                return;
            };
            let id = req.id;
            pending.insert(id, reply);
            let catalog = stage.catalog();
            let tx = tx.clone();
            let spawned = std::thread::Builder::new()
                .name("vignette-catalog".to_owned())
                .spawn(move || {
                    let result = catalog.provide(&req.topic);
                    let _ = tx.send(Command::ShowLoaded { id: req.id, result });
                });
            if let Err(e) = spawned {
                let err = VignetteError::provider(format!("spawn catalog worker: {e}"));
                let outcome = stage.complete_show(id, Err(err));
                if let Some(reply) = pending.remove(&id) {
                    let _ = reply.send(outcome);
                }
            }
        }
        Command::ShowLoaded { id, result } => {
            let outcome = stage.complete_show(id, result);
            if let Some(reply) = pending.remove(&id) {
                let _ = reply.send(outcome);
            }
        }
        Command::GoTo(index) => {
            stage.go_to(index);
        }
        Command::Next => {
            stage.next();
        }
        Command::Previous => {
            stage.previous();
        }
        Command::TogglePlay => {
            stage.toggle_play();
        }
        Command::SetAutoplay(on) => stage.set_autoplay(on),
        Command::SetNarration(on) => stage.set_narration_enabled(on),
        Command::SetQuality(q) => stage.set_quality(q),
        Command::SetLanguage(lang) => stage.set_language(lang),
        Command::Snapshot(reply) => {
            let _ = reply.send(stage.snapshot());
        }
        Command::Shutdown => {}
    }
}
