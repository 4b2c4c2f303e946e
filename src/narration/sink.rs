/// Speech output contract.
///
/// `speak` replaces whatever is currently being spoken; `cancel` silences without starting
/// anything new. Neither call is awaited by the stage.
pub trait NarrationSink: Send {
    /// Start speaking `text` in `language`, cancelling any utterance in progress.
    fn speak(&mut self, text: &str, language: &str);
    /// Stop the current utterance, if any.
    fn cancel(&mut self);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

impl NarrationSink for SilentNarrator {
    fn speak(&mut self, _text: &str, _language: &str) {}

    fn cancel(&mut self) {}
}

/// Sink that reports utterances through `tracing` and remembers the one in flight.
#[derive(Debug, Default, Clone)]
pub struct TracingNarrator {
    current: Option<String>,
}

impl TracingNarrator {
    /// New sink with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the utterance currently in flight.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl NarrationSink for TracingNarrator {
    fn speak(&mut self, text: &str, language: &str) {
        if let Some(prev) = self.current.take() {
            tracing::debug!(chars = prev.len(), "narration replaced");
        }
        tracing::info!(language, text, "narration");
        self.current = Some(text.to_owned());
    }

    fn cancel(&mut self) {
        if self.current.take().is_some() {
            tracing::info!("narration cancelled");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narration/sink.rs"]
mod tests;
