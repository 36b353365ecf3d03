//! Play-loop coordinator
//!
//! Owns the parsed document, the active session, the event log, the
//! render cache and the win-transition timer. All mutations run to
//! completion in response to discrete player actions; the delayed
//! return-to-lobby is the only scheduled operation and is ignored when
//! it outlives its session.

use crate::core::{Document, Fragment, FragmentId};
use crate::render::{FragmentRenderer, RenderCache, RenderMode};
use crate::session::{
    generate, slot_status, win_condition, Difficulty, EventLog, PuzzleSession, SessionEvent,
    SlotStatus, VerbosityLevel, WinScheduler, WIN_DISPLAY_DELAY,
};
use crate::{PuzzleError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Duration;

/// Coordinates one document's puzzle play
pub struct PuzzleEngine {
    document: Document,
    session: Option<PuzzleSession>,
    events: EventLog,
    scheduler: WinScheduler,
    cache: RenderCache,
    rng: ChaCha12Rng,
    win_notify: Option<UnboundedSender<u64>>,
    win_delay: Duration,
    next_epoch: u64,
}

impl PuzzleEngine {
    pub fn new(document: Document) -> Self {
        PuzzleEngine {
            document,
            session: None,
            events: EventLog::default(),
            scheduler: WinScheduler::new(),
            cache: RenderCache::new(),
            rng: ChaCha12Rng::seed_from_u64(0),
            win_notify: None,
            win_delay: WIN_DISPLAY_DELAY,
            next_epoch: 1,
        }
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.events = EventLog::new(verbosity);
        self
    }

    /// Seed the engine RNG for reproducible session generation
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Register the channel the delayed lobby return is delivered on.
    /// Without a channel the win is still recorded, just not scheduled.
    pub fn set_win_notify(&mut self, notify: UnboundedSender<u64>) {
        self.win_notify = Some(notify);
    }

    pub fn set_win_delay(&mut self, delay: Duration) {
        self.win_delay = delay;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn session(&self) -> Option<&PuzzleSession> {
        self.session.as_ref()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Start a fresh session for a group; prior play state for that
    /// group is discarded
    pub fn start_session(&mut self, group_index: usize, difficulty: Difficulty) -> Result<()> {
        let group = self
            .document
            .group(group_index)
            .ok_or(PuzzleError::GroupNotFound(group_index))?;
        if group.is_restored {
            return Err(PuzzleError::InvalidSession(format!(
                "group {} is already restored",
                group_index
            )));
        }

        let mut session = generate(&self.document, group_index, difficulty, &mut self.rng)?;
        session.epoch = self.next_epoch;
        self.next_epoch += 1;

        self.scheduler.cancel();
        self.cache.clear();
        self.session = Some(session);
        self.events.log(SessionEvent::SessionStarted {
            group_index,
            difficulty,
        });

        // A group with zero playable fragments is won on arrival
        self.check_win();
        Ok(())
    }

    fn active_session_mut(&mut self) -> Result<&mut PuzzleSession> {
        self.session
            .as_mut()
            .ok_or_else(|| PuzzleError::InvalidSession("no active session".to_string()))
    }

    fn ensure_not_restored(&self) -> Result<()> {
        let restored = self
            .session
            .as_ref()
            .and_then(|s| self.document.group(s.group_index))
            .is_some_and(|g| g.is_restored);
        if restored {
            return Err(PuzzleError::InvalidSession(
                "group is restored and read-only".to_string(),
            ));
        }
        Ok(())
    }

    /// Place a pool fragment into a slot and run the win check
    pub fn place(&mut self, slot: usize, fragment_id: FragmentId) -> Result<()> {
        self.ensure_not_restored()?;
        self.active_session_mut()?.place(slot, fragment_id)?;
        self.events.log(SessionEvent::FragmentPlaced {
            slot,
            fragment: fragment_id,
        });
        self.check_win();
        Ok(())
    }

    /// Clear a slot, returning its fragment to the pool
    pub fn unplace(&mut self, slot: usize) -> Result<()> {
        self.ensure_not_restored()?;
        let fragment = self.active_session_mut()?.unplace(slot)?;
        self.events.log(SessionEvent::FragmentRemoved {
            slot,
            fragment: fragment.id,
        });
        Ok(())
    }

    /// Record a pool selection (UI hint; no state change)
    pub fn select_fragment(&mut self, fragment_id: FragmentId) -> Result<()> {
        let available = self
            .session
            .as_ref()
            .is_some_and(|s| s.available_pool().iter().any(|f| f.id == fragment_id));
        if !available {
            return Err(PuzzleError::InvalidPlacement(format!(
                "fragment {} is not available in the pool",
                fragment_id
            )));
        }
        self.events.log(SessionEvent::FragmentSelected {
            fragment: fragment_id,
        });
        Ok(())
    }

    pub fn deselect_fragment(&mut self, fragment_id: FragmentId) {
        self.events.log(SessionEvent::FragmentDeselected {
            fragment: fragment_id,
        });
    }

    fn check_win(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let group_index = session.group_index;
        let epoch = session.epoch;
        let Some(group) = self.document.group(group_index) else {
            return;
        };
        if group.is_restored || !win_condition(group, &session.slots) {
            return;
        }

        if let Some(group) = self.document.group_mut(group_index) {
            group.is_restored = true;
        }
        self.events.log(SessionEvent::GroupRestored { group_index });
        if let Some(notify) = &self.win_notify {
            self.scheduler
                .schedule(epoch, self.win_delay, notify.clone());
        }
    }

    /// Act on a fired win timer; stale epochs (from a replaced or
    /// discarded session) are ignored
    pub fn handle_win_timer(&mut self, epoch: u64) -> bool {
        if self.session.as_ref().is_some_and(|s| s.epoch == epoch) {
            self.return_to_lobby();
            true
        } else {
            false
        }
    }

    /// Tear down the active view: drop the session, cancel the timer,
    /// clear the render cache
    pub fn return_to_lobby(&mut self) {
        self.scheduler.cancel();
        self.session = None;
        self.cache.clear();
    }

    /// Per-slot styling flags for the active session
    pub fn slot_statuses(&self) -> Vec<SlotStatus> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        let Some(group) = self.document.group(session.group_index) else {
            return Vec::new();
        };
        (0..session.slot_count())
            .map(|i| slot_status(session, i, group))
            .collect()
    }

    /// The visible pool of the active session
    pub fn available_pool(&self) -> Vec<&Fragment> {
        self.session
            .as_ref()
            .map(|s| s.available_pool())
            .unwrap_or_default()
    }

    /// Render a fragment's text through the per-view cache
    pub fn render_text(
        &mut self,
        renderer: &dyn FragmentRenderer,
        text: &str,
        mode: RenderMode,
    ) -> String {
        self.cache.render(renderer, text, mode, &self.document.path)
    }

    /// Render a whole atomic block as one concatenated unit
    pub fn render_block(
        &mut self,
        renderer: &dyn FragmentRenderer,
        group_index: usize,
        block_id: crate::core::BlockId,
    ) -> Option<String> {
        let group = self.document.group(group_index)?;
        let members = group.block_members(block_id);
        if members.is_empty() {
            return None;
        }
        let text = members
            .iter()
            .map(|&i| group.fragments[i].text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Some(self.cache.render(
            renderer,
            &text,
            RenderMode::Block,
            &self.document.path,
        ))
    }
}
