use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use parejas_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

/// Milliseconds before a resolved attempt is cleared from the board.
const RESOLVE_DELAY_MS: u32 = 1_000;
/// Countdown granularity.
const TICK_MS: u32 = 1_000;

/// Best final score across games, persisted across browser sessions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct HighScore(pub u32);

impl HighScore {
    /// Returns true when `score` beats the stored best.
    fn record(&mut self, score: u32) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }

    /// Load, merge and save in one step; called when a game is won.
    pub(crate) fn update_with(score: u32) {
        let mut best = Self::local_or_default();
        if best.record(score) {
            log::debug!("new high score: {}", best.0);
            best.local_save();
        }
    }
}

impl StorageKey for HighScore {
    const KEY: &'static str = "parejas:high-score";
}

/// Transient status line under the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Feedback {
    TryAgain,
    TimeUp,
}

impl Feedback {
    const fn text(self) -> &'static str {
        match self {
            Self::TryAgain => "Try Again!",
            Self::TimeUp => "Time's up!",
        }
    }
}

/// Everything a cell needs to paint itself.
#[derive(Copy, Clone, Debug, PartialEq)]
struct CellPaint {
    color: game::TileColor,
    matched: bool,
    selected: bool,
}

/// One playthrough: the engine plus view-only transients, stamped with
/// an epoch so delayed clears scheduled by an earlier game can be told
/// apart from current ones.
#[derive(Clone, Debug, PartialEq)]
struct GameSession {
    engine: game::GameEngine,
    feedback: Option<Feedback>,
    epoch: u64,
}

impl GameSession {
    fn new(board: game::Board, epoch: u64) -> Self {
        Self {
            engine: game::GameEngine::new(board),
            feedback: None,
            epoch,
        }
    }

    fn tap(&mut self, ix: game::CellIx) -> game::TapOutcome {
        let outcome = match self.engine.tap(ix) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("tap on cell {} rejected: {}", ix, err);
                return game::TapOutcome::Ignored;
            }
        };
        if outcome == game::TapOutcome::Mismatched {
            self.feedback = Some(Feedback::TryAgain);
        }
        outcome
    }

    fn tick(&mut self) -> game::TickOutcome {
        let outcome = self.engine.tick();
        if outcome == game::TickOutcome::Expired {
            self.feedback = Some(Feedback::TimeUp);
        }
        outcome
    }

    /// Ignores the clear if it was scheduled by a previous game.
    fn clear_selection_if(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            log::debug!("stale selection clear dropped (epoch {} != {})", epoch, self.epoch);
            return false;
        }
        let had_selection = !self.engine.selection().is_empty();
        self.engine.clear_selection();
        had_selection
    }

    /// Ignores the clear if it was scheduled by a previous game.
    fn clear_feedback_if(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            log::debug!("stale feedback clear dropped (epoch {} != {})", epoch, self.epoch);
            return false;
        }
        // the time's-up line stays until restart
        if self.feedback == Some(Feedback::TimeUp) {
            return false;
        }
        self.feedback.take().is_some()
    }

    fn cell_paint(&self, ix: game::CellIx) -> CellPaint {
        CellPaint {
            color: self.engine.color_at(ix),
            matched: self.engine.is_matched(ix),
            selected: self.engine.is_selected(ix),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    TapCell(game::CellIx),
    Tick,
    ClearSelection { epoch: u64 },
    ClearFeedback { epoch: u64 },
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    ix: game::CellIx,
    paint: CellPaint,
    callback: Callback<game::CellIx>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps { ix, paint, callback } = props.clone();

    let mut class = classes!("cell", color_class(paint.color));
    if paint.matched {
        class.push("matched");
    }
    if paint.selected {
        class.push("selected");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} clicked", ix);
        callback.emit(ix);
    });

    html! {
        <td {class} {onclick}/>
    }
}

const fn color_class(color: game::TileColor) -> &'static str {
    use game::TileColor::*;
    match color {
        Red => "red",
        Blue => "blue",
        Green => "green",
        Yellow => "yellow",
        Trap => "trap",
    }
}

fn format_for_counter(num: u32) -> String {
    if num > 999 {
        "999".to_string()
    } else {
        format!("{:03}", num)
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: GameSession,
    next_epoch: u64,
    _timer_interval: Interval,
}

impl GameView {
    fn new_session(seed: u64, epoch: u64) -> GameSession {
        use game::BoardGenerator;
        let board = game::RandomBoardGenerator::new(seed).generate();
        GameSession::new(board, epoch)
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MS, move || link.send_message(Msg::Tick))
    }

    /// Schedule the two independent one-shot clears for a resolved
    /// attempt, each stamped with the current session epoch.
    fn schedule_clears(&self, ctx: &Context<Self>, outcome: game::TapOutcome) {
        let epoch = self.session.epoch;
        {
            let link = ctx.link().clone();
            Timeout::new(RESOLVE_DELAY_MS, move || {
                link.send_message(Msg::ClearSelection { epoch })
            })
            .forget();
        }
        if outcome == game::TapOutcome::Mismatched {
            let link = ctx.link().clone();
            Timeout::new(RESOLVE_DELAY_MS, move || {
                link.send_message(Msg::ClearFeedback { epoch })
            })
            .forget();
        }
    }

    fn view_won(&self, ctx: &Context<Self>) -> Html {
        let score = self.session.engine.score();
        let cb_new_game = ctx.link().callback(|_| Msg::NewGame);

        html! {
            <div class="parejas won">
                <h1 class="banner">{"🎉 You Win! 🎉"}</h1>
                <p class="final-score">{ format!("Final Score: {}", score) }</p>
                <button class="restart" onclick={cb_new_game}>{"Restart Game"}</button>
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("initial seed: {}", seed);
        Self {
            session: Self::new_session(seed, 0),
            next_epoch: 0,
            _timer_interval: Self::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            TapCell(ix) => {
                let outcome = self.session.tap(ix);
                if outcome.resolves_attempt() {
                    self.schedule_clears(ctx, outcome);
                }
                if outcome == game::TapOutcome::Won {
                    HighScore::update_with(self.session.engine.score());
                }
                outcome.has_update()
            }
            Tick => self.session.tick().has_update(),
            ClearSelection { epoch } => self.session.clear_selection_if(epoch),
            ClearFeedback { epoch } => self.session.clear_feedback_if(epoch),
            NewGame => {
                self.next_epoch += 1;
                self.session = Self::new_session(js_random_seed(), self.next_epoch);
                log::debug!("new game, epoch {}", self.next_epoch);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use game::GameState::*;

        let state = self.session.engine.state();
        if state == Won {
            return self.view_won(ctx);
        }

        let score = self.session.engine.score();
        let seconds = self.session.engine.seconds_left();
        let state_class = classes!(match state {
            NotStarted => "not-started",
            InProgress => "in-progress",
            Won => "won",
            Lost => "lost",
        });
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        let countdown = (state == InProgress).then(|| {
            let low = seconds <= 10;
            html! {
                <p class={classes!("countdown", low.then_some("low"))}>
                    { format!("Time Remaining: {}s", seconds) }
                </p>
            }
        });
        let feedback = self.session.feedback.map(|feedback| {
            html! {
                <p class="feedback warn">{ feedback.text() }</p>
            }
        });

        html! {
            <div class="parejas">
                <nav>
                    <aside>{ format_for_counter(score) }</aside>
                    <span><button class={state_class} onclick={cb_new_game}/></span>
                    <aside>{ format_for_counter(seconds) }</aside>
                </nav>
                { countdown }
                <table>
                    {
                        for (0..game::GRID_SIDE).map(|row| html! {
                            <tr>
                                {
                                    for (0..game::GRID_SIDE).map(|col| {
                                        let ix = game::to_cell_ix((row, col));
                                        let paint = self.session.cell_paint(ix);
                                        let callback = ctx.link().callback(Msg::TapCell);
                                        html! {
                                            <CellView {ix} {paint} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                { feedback }
                <p class="score">{ format!("Score: {}", score) }</p>
            </div>
        }
    }
}
