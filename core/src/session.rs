use alloc::collections::BTreeMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How long a mismatched or matched second pick stays visible before it is applied.
pub const REVEAL_DELAY_MS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(u32);

/// A second pick waiting out [`REVEAL_DELAY_MS`]; only meaningful for the round that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredPick {
    round: RoundId,
    card: CardIndex,
}

impl DeferredPick {
    pub const fn round(self) -> RoundId {
        self.round
    }

    pub const fn card(self) -> CardIndex {
        self.card
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    Ignored,
    Applied(SelectOutcome),
    Deferred(DeferredPick),
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Applied(outcome) => outcome.has_update(),
            Self::Deferred(_) => true,
        }
    }
}

/// What the player sees at one board position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardView {
    Hidden,
    FaceUp(FaceType),
    Discarded(FaceType),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub difficulty: Difficulty,
    pub time: ElapsedTime,
    pub attempts: u32,
    pub new_best: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Round {
    id: RoundId,
    difficulty: Difficulty,
    engine: PlayEngine,
    layout: Array2<CardIndex>,
    revealing: Option<CardIndex>,
    stopwatch: Stopwatch,
    summary: Option<RoundSummary>,
}

impl Round {
    fn new(id: RoundId, difficulty: Difficulty, deck: Deck, seed: u64) -> Self {
        let side = usize::from(difficulty.side());
        let order = deal(seed.wrapping_add(1), difficulty.card_count());
        let layout = Array2::from_shape_fn((side, side), |(row, col)| order[row * side + col]);

        let mut stopwatch = Stopwatch::new();
        stopwatch.start();

        Self {
            id,
            difficulty,
            engine: PlayEngine::new(deck),
            layout,
            revealing: None,
            stopwatch,
            summary: None,
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    /// Board position `(row, col)` to card index.
    pub fn layout(&self) -> &Array2<CardIndex> {
        &self.layout
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Second pick currently shown face up while its resolution is delayed.
    pub fn revealing(&self) -> Option<CardIndex> {
        self.revealing
    }

    pub fn summary(&self) -> Option<RoundSummary> {
        self.summary
    }

    pub fn card_view(&self, index: CardIndex) -> Option<CardView> {
        let card = self.engine.card_at(index)?;
        Some(if card.is_discarded() {
            CardView::Discarded(card.face())
        } else if card.is_selected() || self.revealing == Some(index) {
            CardView::FaceUp(card.face())
        } else {
            CardView::Hidden
        })
    }
}

/// Controller between the board UI and [`PlayEngine`].
///
/// Owns the interaction guard: while a second pick is on display every click is dropped, not queued.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableSession {
    round: Option<Round>,
    next_round: u32,
    interaction_enabled: bool,
    best_times: BTreeMap<Difficulty, ElapsedTime>,
}

impl Default for TableSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSession {
    pub fn new() -> Self {
        Self {
            round: None,
            next_round: 0,
            interaction_enabled: true,
            best_times: BTreeMap::new(),
        }
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    pub fn best_time(&self, difficulty: Difficulty) -> Option<ElapsedTime> {
        self.best_times.get(&difficulty).copied()
    }

    pub fn start_round(&mut self, difficulty: Difficulty, seed: u64) -> RoundId {
        let deck = RandomDeckGenerator::new(seed).generate(difficulty);
        self.replace_round(difficulty, deck, seed)
    }

    /// Starts a round over a known deck, which must fill the board for `difficulty`.
    pub fn start_round_with_deck(
        &mut self,
        difficulty: Difficulty,
        deck: Deck,
        seed: u64,
    ) -> Result<RoundId> {
        if deck.card_count() != difficulty.card_count() {
            return Err(GameError::DeckSizeMismatch {
                expected: difficulty.pair_count(),
                actual: usize::from(deck.pair_count()),
            });
        }
        Ok(self.replace_round(difficulty, deck, seed))
    }

    pub fn abandon_round(&mut self) {
        if let Some(round) = self.round.take() {
            log::debug!("abandoned round {:?}", round.id);
        }
        self.interaction_enabled = true;
    }

    pub fn click(&mut self, index: CardIndex) -> ClickOutcome {
        if !self.interaction_enabled {
            log::trace!("click on card {} dropped while a pick is on display", index);
            return ClickOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return ClickOutcome::Ignored;
        };
        if round.engine.is_finished() || !round.engine.can_select(index) {
            return ClickOutcome::Ignored;
        }

        match round.engine.pending_pick() {
            Some(first) if first != index => {
                log::trace!("deferring second pick {} against {}", index, first);
                round.revealing = Some(index);
                self.interaction_enabled = false;
                ClickOutcome::Deferred(DeferredPick {
                    round: round.id,
                    card: index,
                })
            }
            _ => {
                let outcome = round.engine.select_card(index);
                Self::after_select(&mut self.best_times, round, outcome);
                ClickOutcome::Applied(outcome)
            }
        }
    }

    /// Applies a pick returned by [`TableSession::click`] once its delay has elapsed.
    ///
    /// Picks that are no longer on display, because they were already resolved or their round has since
    /// been replaced or abandoned, are dropped and return `None`.
    pub fn resolve(&mut self, pick: DeferredPick) -> Option<SelectOutcome> {
        let Some(round) = self
            .round
            .as_mut()
            .filter(|round| round.id == pick.round && round.revealing == Some(pick.card))
        else {
            log::warn!(
                "dropping stale pick of card {} from round {:?}",
                pick.card,
                pick.round
            );
            return None;
        };

        round.revealing = None;
        let outcome = round.engine.select_card(pick.card);
        Self::after_select(&mut self.best_times, round, outcome);
        self.interaction_enabled = true;
        log::debug!("resolved pick {} as {:?}", pick.card, outcome);
        Some(outcome)
    }

    /// Advances the current round's stopwatch; returns whether the shown time changed.
    pub fn tick(&mut self) -> bool {
        self.round
            .as_mut()
            .is_some_and(|round| round.stopwatch.tick())
    }

    fn replace_round(&mut self, difficulty: Difficulty, deck: Deck, seed: u64) -> RoundId {
        let id = RoundId(self.next_round);
        self.next_round = self.next_round.wrapping_add(1);
        self.round = Some(Round::new(id, difficulty, deck, seed));
        self.interaction_enabled = true;
        log::debug!("started {} round {:?} with seed {}", difficulty, id, seed);
        id
    }

    fn after_select(
        best_times: &mut BTreeMap<Difficulty, ElapsedTime>,
        round: &mut Round,
        outcome: SelectOutcome,
    ) {
        if outcome != SelectOutcome::Won {
            return;
        }

        round.stopwatch.stop();
        let time = round.stopwatch.elapsed();
        let new_best = best_times
            .get(&round.difficulty)
            .is_none_or(|&best| time < best);
        if new_best {
            best_times.insert(round.difficulty, time);
        }
        round.summary = Some(RoundSummary {
            difficulty: round.difficulty,
            time,
            attempts: round.engine.attempts(),
            new_best,
        });
        log::debug!("round {:?} won in {}", round.id, time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FaceType::*;

    const EASY_FACES: [FaceType; 8] = [Apple, Banana, Cherry, Orange, Peach, Watermelon, Apple, Banana];

    fn easy_session() -> (TableSession, RoundId) {
        let mut session = TableSession::new();
        let deck = Deck::for_difficulty(Difficulty::Easy, &EASY_FACES).unwrap();
        let id = session
            .start_round_with_deck(Difficulty::Easy, deck, 5)
            .unwrap();
        (session, id)
    }

    fn deferred(outcome: ClickOutcome) -> DeferredPick {
        match outcome {
            ClickOutcome::Deferred(pick) => pick,
            other => panic!("expected deferred pick, got {:?}", other),
        }
    }

    #[test]
    fn layout_covers_every_card_once() {
        let (session, _) = easy_session();
        let layout = session.round().unwrap().layout();

        assert_eq!(layout.dim(), (4, 4));
        let mut seen = [false; 16];
        for &index in layout {
            seen[usize::from(index)] = true;
        }
        assert!(seen.iter().all(|&seen| seen));
    }

    #[test]
    fn first_click_applies_immediately() {
        let (mut session, _) = easy_session();

        assert_eq!(
            session.click(0),
            ClickOutcome::Applied(SelectOutcome::Pending)
        );
        assert!(session.interaction_enabled());
        assert_eq!(
            session.round().unwrap().card_view(0),
            Some(CardView::FaceUp(Apple))
        );
        assert_eq!(session.round().unwrap().card_view(1), Some(CardView::Hidden));
    }

    #[test]
    fn second_click_is_deferred_and_locks_input() {
        let (mut session, id) = easy_session();
        session.click(0);

        let pick = deferred(session.click(2));
        assert_eq!(pick.round(), id);
        assert_eq!(pick.card(), 2);
        assert!(!session.interaction_enabled());
        assert_eq!(
            session.round().unwrap().card_view(2),
            Some(CardView::FaceUp(Banana))
        );

        let before = session.clone();
        assert_eq!(session.click(4), ClickOutcome::Ignored);
        assert_eq!(session.click(1), ClickOutcome::Ignored);
        assert_eq!(session, before);

        assert_eq!(session.resolve(pick), Some(SelectOutcome::Mismatched));
        assert!(session.interaction_enabled());
        let round = session.round().unwrap();
        assert_eq!(round.revealing(), None);
        assert_eq!(round.card_view(0), Some(CardView::Hidden));
        assert_eq!(round.card_view(2), Some(CardView::Hidden));
    }

    #[test]
    fn reclicking_pending_card_does_not_lock_input() {
        let (mut session, _) = easy_session();
        session.click(3);

        assert_eq!(
            session.click(3),
            ClickOutcome::Applied(SelectOutcome::NoChange)
        );
        assert!(session.interaction_enabled());
        assert_eq!(session.round().unwrap().engine().pending_pick(), Some(3));
    }

    #[test]
    fn matched_cards_are_ignored_afterwards() {
        let (mut session, _) = easy_session();
        session.click(0);
        let pick = deferred(session.click(1));
        assert_eq!(session.resolve(pick), Some(SelectOutcome::Matched));

        assert_eq!(
            session.round().unwrap().card_view(1),
            Some(CardView::Discarded(Apple))
        );
        assert_eq!(session.click(0), ClickOutcome::Ignored);
        assert_eq!(session.click(1), ClickOutcome::Ignored);
        assert_eq!(session.click(99), ClickOutcome::Ignored);
    }

    #[test]
    fn resolving_same_pick_twice_is_dropped() {
        let (mut session, _) = easy_session();
        session.click(0);
        let pick = deferred(session.click(2));
        assert_eq!(session.resolve(pick), Some(SelectOutcome::Mismatched));

        session.click(4);
        let later = deferred(session.click(6));
        let before = session.clone();

        assert_eq!(session.resolve(pick), None);
        assert_eq!(session, before);
        assert!(!session.interaction_enabled());
        assert_eq!(session.round().unwrap().engine().pending_pick(), Some(4));

        assert_eq!(session.resolve(later), Some(SelectOutcome::Mismatched));
        assert_eq!(session.resolve(pick), None);
        assert_eq!(session.round().unwrap().engine().pending_pick(), None);
        assert!(session.interaction_enabled());
    }

    #[test]
    fn stale_pick_from_replaced_round_is_dropped() {
        let (mut session, _) = easy_session();
        session.click(0);
        let stale = deferred(session.click(1));

        let new_id = session.start_round(Difficulty::Medium, 9);
        assert_ne!(new_id, stale.round());
        assert!(session.interaction_enabled());
        let fresh = session.round().unwrap().clone();

        assert_eq!(session.resolve(stale), None);
        assert_eq!(session.round(), Some(&fresh));
        assert!(session.interaction_enabled());
    }

    #[test]
    fn abandoning_round_drops_pending_pick() {
        let (mut session, _) = easy_session();
        session.click(0);
        let pick = deferred(session.click(5));

        session.abandon_round();

        assert!(session.round().is_none());
        assert!(session.interaction_enabled());
        assert_eq!(session.resolve(pick), None);
        assert_eq!(session.click(0), ClickOutcome::Ignored);
        assert!(!session.tick());
    }

    #[test]
    fn ticks_follow_round_clock() {
        let (mut session, _) = easy_session();
        for _ in 0..3 {
            assert!(session.tick());
        }
        assert_eq!(session.round().unwrap().stopwatch().total_secs(), 3);
    }

    #[test]
    fn winning_records_best_time() {
        let (mut session, _) = easy_session();
        for _ in 0..90 {
            session.tick();
        }

        for first in (0..16).step_by(2) {
            session.click(first);
            let pick = deferred(session.click(first + 1));
            session.resolve(pick);
        }

        let round = session.round().unwrap();
        assert!(round.engine().result());
        assert!(!round.stopwatch().is_running());
        assert_eq!(
            round.summary(),
            Some(RoundSummary {
                difficulty: Difficulty::Easy,
                time: ElapsedTime::from_secs(90),
                attempts: 8,
                new_best: true,
            })
        );
        assert_eq!(
            session.best_time(Difficulty::Easy),
            Some(ElapsedTime::from_secs(90))
        );
        assert!(!session.tick());
        assert_eq!(session.click(0), ClickOutcome::Ignored);
    }

    #[test]
    fn slower_win_keeps_previous_best() {
        let mut session = TableSession::new();
        for secs in [30, 45] {
            let deck = Deck::for_difficulty(Difficulty::Easy, &EASY_FACES).unwrap();
            session
                .start_round_with_deck(Difficulty::Easy, deck, 1)
                .unwrap();
            for _ in 0..secs {
                session.tick();
            }
            for first in (0..16).step_by(2) {
                session.click(first);
                let pick = deferred(session.click(first + 1));
                session.resolve(pick);
            }
        }

        assert_eq!(
            session.best_time(Difficulty::Easy),
            Some(ElapsedTime::from_secs(30))
        );
        assert!(!session.round().unwrap().summary().unwrap().new_best);
        assert_eq!(session.best_time(Difficulty::Hard), None);
    }

    #[test]
    fn deck_must_fit_board() {
        let mut session = TableSession::new();
        let deck = Deck::from_faces(&[Apple, Peach]).unwrap();

        assert_eq!(
            session.start_round_with_deck(Difficulty::Easy, deck, 0),
            Err(GameError::DeckSizeMismatch {
                expected: 8,
                actual: 2
            })
        );
        assert!(session.round().is_none());
    }
}
