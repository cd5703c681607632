use crate::utils::*;
use gloo::timers::callback::{Interval, Timeout};
use memorito_core as game;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    PickDifficulty(game::Difficulty),
    CardClick(game::CardIndex),
    Resolve(game::DeferredPick),
    Tick,
    NewGame,
}

fn finish_message(summary: &game::RoundSummary) -> String {
    format!("You finished in {}.", summary.time.sentence())
}

fn attempts_message(summary: &game::RoundSummary) -> String {
    format!(
        "{} pairs in {} attempts on {}.",
        summary.difficulty.pair_count(),
        summary.attempts,
        summary.difficulty
    )
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    view: game::CardView,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardCell)]
fn card_cell(props: &CardProps) -> Html {
    use game::CardView::*;

    let CardProps {
        index,
        view,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match view {
            Hidden => classes!(),
            FaceUp(_) => classes!("open"),
            Discarded(_) => classes!("open", "found"),
        }
    );
    if locked {
        class.push("locked");
    }

    let glyph = match view {
        Hidden => "",
        FaceUp(face) | Discarded(face) => face.glyph(),
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <td {class} {onclick}>{glyph}</td>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
    /// Start straight away instead of asking for a difficulty
    #[prop_or_default]
    pub difficulty: Option<game::Difficulty>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::TableSession,
    forced_seed: Option<u64>,
    _timer_interval: Interval,
}

impl GameView {
    fn next_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::Tick))
    }

    /// Lets the player look at the second card before the pick is applied.
    ///
    /// The timeout is never cancelled; picks that outlive their round are dropped by the session.
    fn schedule_resolve(ctx: &Context<Self>, pick: game::DeferredPick) {
        let link = ctx.link().clone();
        let _ = Timeout::new(game::REVEAL_DELAY_MS, move || {
            link.send_message(Msg::Resolve(pick))
        })
        .forget();
    }

    fn click_card(&mut self, ctx: &Context<Self>, index: game::CardIndex) -> bool {
        use game::ClickOutcome::*;

        match self.session.click(index) {
            Ignored => false,
            Applied(outcome) => outcome.has_update(),
            Deferred(pick) => {
                Self::schedule_resolve(ctx, pick);
                true
            }
        }
    }

    fn view_prompt(&self, ctx: &Context<Self>) -> Html {
        html! {
            <article class="prompt">
                <h2>{"Choose a difficulty"}</h2>
                <ul>
                    {
                        for game::Difficulty::ALL.into_iter().map(|difficulty| {
                            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::PickDifficulty(difficulty));
                            let side = difficulty.side();
                            let best = self
                                .session
                                .best_time(difficulty)
                                .map(|time| format!("best {}", time));
                            html! {
                                <li>
                                    <button {onclick}>{format!("{} ({}×{})", difficulty, side, side)}</button>
                                    if let Some(best) = best {
                                        <small>{best}</small>
                                    }
                                </li>
                            }
                        })
                    }
                </ul>
            </article>
        }
    }

    fn view_round(&self, ctx: &Context<Self>, round: &game::Round) -> Html {
        let side = usize::from(round.difficulty().side());
        let locked = !self.session.interaction_enabled();
        let elapsed_time = round.stopwatch().to_string();
        let pairs_left = round.engine().pairs_left();
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="memorito">
                <nav>
                    <aside>{format!("{} left", pairs_left)}</aside>
                    <span><button onclick={cb_new_game}>{"New game"}</button></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                <table class={classes!(format!("side-{}", side), (!locked).then_some("playable"))}>
                    {
                        for (0..side).map(|row| html! {
                            <tr>
                                {
                                    for (0..side).map(|col| {
                                        let index = round.layout()[(row, col)];
                                        let view = round.card_view(index).unwrap_or(game::CardView::Hidden);
                                        let callback = ctx.link().callback(Msg::CardClick);
                                        html! {
                                            <CardCell {index} {view} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if let Some(summary) = round.summary() {
                    <Modal>{self.view_summary(ctx, summary)}</Modal>
                }
            </div>
        }
    }

    fn view_summary(&self, ctx: &Context<Self>, summary: game::RoundSummary) -> Html {
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);
        html! {
            <dialog id="finished" open={true}>
                <article>
                    <h2>{finish_message(&summary)}</h2>
                    <p>{attempts_message(&summary)}</p>
                    if summary.new_best {
                        <p class="best">{"New best time!"}</p>
                    }
                    <footer>
                        <button onclick={cb_new_game}>{"Play again"}</button>
                    </footer>
                </article>
            </dialog>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { seed, difficulty } = ctx.props().clone();
        let mut view = Self {
            session: game::TableSession::new(),
            forced_seed: seed,
            _timer_interval: GameView::create_timer(ctx),
        };
        if let Some(difficulty) = difficulty {
            let seed = view.next_seed();
            view.session.start_round(difficulty, seed);
        }
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            PickDifficulty(difficulty) => {
                let seed = self.next_seed();
                log::debug!("new {} round, seed: {}", difficulty, seed);
                self.session.start_round(difficulty, seed);
                true
            }
            CardClick(index) => self.click_card(ctx, index),
            Resolve(pick) => self.session.resolve(pick).is_some(),
            Tick => self.session.tick(),
            NewGame => {
                self.session.abandon_round();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.session.round() {
            Some(round) => self.view_round(ctx, round),
            None => self.view_prompt(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(secs: u32) -> game::RoundSummary {
        game::RoundSummary {
            difficulty: game::Difficulty::Medium,
            time: game::ElapsedTime::from_secs(secs),
            attempts: 25,
            new_best: false,
        }
    }

    #[test]
    fn finish_message_spells_out_minutes() {
        assert_eq!(
            finish_message(&summary(125)),
            "You finished in 2 minutes and 5 seconds."
        );
        assert_eq!(finish_message(&summary(9)), "You finished in 9 seconds.");
    }

    #[test]
    fn attempts_message_names_board() {
        assert_eq!(
            attempts_message(&summary(60)),
            "18 pairs in 25 attempts on Medium."
        );
    }
}
