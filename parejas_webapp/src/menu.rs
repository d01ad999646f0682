use crate::game::HighScore;
use crate::theme::Theme;
use crate::utils::LocalOrDefault;
use yew::prelude::*;

/// Which panel of the shell is showing.
///
/// The shell is a plain three-way switch; it shares no state with the
/// grid game, and its "game" page is a static placeholder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum MenuPage {
    Home,
    GamePlaceholder,
    Guide,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Navigate(MenuPage),
    ShowHighScore,
    ToggleTheme,
    Exit,
}

pub(crate) struct MenuView {
    page: MenuPage,
    high_score: HighScore,
    theme: Theme,
}

impl MenuView {
    fn view_home(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let cb_start = link.callback(|_| Msg::Navigate(MenuPage::GamePlaceholder));
        let cb_guide = link.callback(|_| Msg::Navigate(MenuPage::Guide));
        let cb_high_score = link.callback(|_| Msg::ShowHighScore);
        let cb_theme = link.callback(|_| Msg::ToggleTheme);
        let cb_exit = link.callback(|_| Msg::Exit);

        html! {
            <div class="menu home">
                <h1>{"🎮 Parejas 🎮"}</h1>
                <button class="start" onclick={cb_start}>{"Start Game"}</button>
                <button class="guide" onclick={cb_guide}>{"Guide"}</button>
                <button class="high-score" onclick={cb_high_score}>{"High Score"}</button>
                <button class="theme" onclick={cb_theme}>
                    { format!("Theme: {}", self.theme.scheme()) }
                </button>
                <button class="exit" onclick={cb_exit}>{"Exit"}</button>
            </div>
        }
    }

    fn view_placeholder(&self, ctx: &Context<Self>) -> Html {
        let cb_back = ctx.link().callback(|_| Msg::Navigate(MenuPage::Home));

        html! {
            <div class="menu placeholder">
                <h1>{"🎯 Game Screen"}</h1>
                <p>{"Your game logic runs here."}</p>
                <button class="back" onclick={cb_back}>{"Back to Menu"}</button>
            </div>
        }
    }

    fn view_guide(&self, ctx: &Context<Self>) -> Html {
        let cb_back = ctx.link().callback(|_| Msg::Navigate(MenuPage::Home));

        html! {
            <div class="menu guide">
                <h1>{"📖 Game Guide"}</h1>
                <ul>
                    <li>{"Start: Begin the game."}</li>
                    <li>{"Guide: Learn how to play."}</li>
                    <li>{"Exit: Quit the app."}</li>
                </ul>
                <button class="back" onclick={cb_back}>{"Back to Menu"}</button>
            </div>
        }
    }
}

impl Component for MenuView {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        // the stored high score is read once, when the shell loads
        Self {
            page: MenuPage::Home,
            high_score: HighScore::local_or_default(),
            theme: Theme::local_or_default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Navigate(page) => {
                if self.page != page {
                    log::debug!("menu page: {:?}", page);
                    self.page = page;
                    true
                } else {
                    false
                }
            }
            ShowHighScore => {
                // console-only display, like the shell it replaces
                log::info!("High Score: {}", self.high_score.0);
                false
            }
            ToggleTheme => {
                self.theme = self.theme.toggled();
                self.theme.apply();
                true
            }
            Exit => {
                if gloo::utils::window().close().is_err() {
                    log::warn!("browser refused to close the window");
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.page {
            MenuPage::Home => self.view_home(ctx),
            MenuPage::GamePlaceholder => self.view_placeholder(ctx),
            MenuPage::Guide => self.view_guide(ctx),
        }
    }
}
