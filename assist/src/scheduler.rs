//! Debounced analysis. Each `schedule` call supersedes the previous one;
//! only the newest pass may publish, and a failing pass leaves the last
//! published snapshot in place.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::analyzer::SuggestionSource;
use crate::types::Suggestion;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A complete suggestion list together with the pass that produced it.
/// Generation 0 is the empty snapshot published before any pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisSnapshot {
    pub generation: u64,
    pub suggestions: Vec<Suggestion>,
}

pub struct AnalysisScheduler {
    source: Arc<dyn SuggestionSource>,
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: Arc<watch::Sender<AnalysisSnapshot>>,
}

impl AnalysisScheduler {
    pub fn new(source: Arc<dyn SuggestionSource>, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(AnalysisSnapshot::default());
        Self {
            source,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalysisSnapshot> {
        self.tx.subscribe()
    }

    /// Most recently published snapshot.
    pub fn latest(&self) -> AnalysisSnapshot {
        self.tx.borrow().clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queue a pass over `text` after the debounce delay, dropping any
    /// pass still waiting. Must be called from within a tokio runtime.
    /// Returns the generation assigned to the new pass.
    pub fn schedule(&mut self, text: impl Into<String>, cursor: usize) -> u64 {
        self.abort_pending();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let text = text.into();
        let source = Arc::clone(&self.source);
        let latest = Arc::clone(&self.generation);
        let tx = Arc::clone(&self.tx);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }
            match source.analyze(&text, cursor) {
                Ok(suggestions) => {
                    if latest.load(Ordering::SeqCst) != generation {
                        tracing::debug!("analysis: discarding stale pass {generation}");
                        return;
                    }
                    tracing::debug!(
                        "analysis: pass {generation} published {} suggestions",
                        suggestions.len()
                    );
                    tx.send_replace(AnalysisSnapshot {
                        generation,
                        suggestions,
                    });
                }
                Err(e) => {
                    tracing::warn!("analysis: pass {generation} failed, keeping last result: {e:#}");
                }
            }
        }));
        generation
    }

    /// Drop the pending pass, if any. Already published results stay.
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for AnalysisScheduler {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ContentAnalyzer;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicUsize;

    const CLAIM: &str = "Studies show a 20% improvement.";

    /// Delegates to the real analyzer but fails on demand and counts calls.
    #[derive(Default)]
    struct Flaky {
        inner: ContentAnalyzer,
        calls: AtomicUsize,
    }

    impl SuggestionSource for Flaky {
        fn analyze(&self, text: &str, cursor: usize) -> anyhow::Result<Vec<Suggestion>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("boom") {
                anyhow::bail!("analysis backend unavailable");
            }
            Ok(self.inner.analyze(text, cursor))
        }
    }

    fn scheduler() -> (Arc<Flaky>, AnalysisScheduler) {
        let source = Arc::new(Flaky::default());
        let scheduler = AnalysisScheduler::new(source.clone(), DEFAULT_DEBOUNCE);
        (source, scheduler)
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_collapse_into_one_pass() {
        let (source, mut scheduler) = scheduler();
        let mut rx = scheduler.subscribe();
        scheduler.schedule("Studies", 0);
        tokio::time::sleep(Duration::from_millis(200)).await;
        let last = scheduler.schedule(CLAIM, 0);

        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.generation, last);
        assert_eq!(snapshot.suggestions.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_runs_before_the_delay() {
        let (source, mut scheduler) = scheduler();
        scheduler.schedule(CLAIM, 0);
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_pass_keeps_last_snapshot() {
        let (source, mut scheduler) = scheduler();
        let first = scheduler.schedule(CLAIM, 0);
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(scheduler.latest().generation, first);

        scheduler.schedule("boom", 0);
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        let latest = scheduler.latest();
        assert_eq!(latest.generation, first);
        assert_eq!(latest.suggestions.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_pass() {
        let (source, mut scheduler) = scheduler();
        scheduler.schedule(CLAIM, 0);
        scheduler.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.latest(), AnalysisSnapshot::default());
    }
}
