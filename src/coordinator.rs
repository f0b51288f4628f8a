use crate::{
    menu::MenuController,
    scroll::{ScrollMetrics, ScrollProgressTracker},
    sections::{Anchor, AnchorRegistry, SectionId, SectionNavigator},
    telemetry::{log_event, LogConfig, LogLevel},
    theme::{Theme, ThemePersistence, ThemeStore},
    typewriter::{RoleList, TypewriterEngine},
};
use serde_json::json;

/// Everything the page can ask the coordinator to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Message {
    Tick,
    ToggleTheme,
    ToggleMenu,
    CloseMenu,
    Navigate(SectionId),
    Scrolled(ScrollMetrics),
    Resized { width: f64 },
}

/// Render parameters derived from coordinator state.
#[derive(Clone, Debug, PartialEq)]
pub struct PortfolioView {
    pub typed_text: String,
    pub theme: Theme,
    pub progress: f64,
    pub menu_open: bool,
}

pub struct PortfolioCoordinator<S, A> {
    typewriter: TypewriterEngine,
    theme: Theme,
    persistence: ThemePersistence<S>,
    scroll: ScrollProgressTracker,
    navigator: SectionNavigator<A>,
    menu: MenuController,
    log: LogConfig,
}

impl<S: ThemeStore, A: Anchor> PortfolioCoordinator<S, A> {
    pub fn mount(roles: RoleList, store: S, anchors: AnchorRegistry<A>, log: LogConfig) -> Self {
        let persistence = ThemePersistence::new(store, log);
        let theme = persistence.load();

        log_event(
            &log,
            LogLevel::Info,
            "portfolio.mounted",
            json!({ "theme": theme, "roles": roles.len(), "sections": anchors.len() }),
        );

        Self {
            typewriter: TypewriterEngine::new(roles),
            theme,
            persistence,
            scroll: ScrollProgressTracker::default(),
            navigator: SectionNavigator::new(anchors, log),
            menu: MenuController::default(),
            log,
        }
    }

    /// Applies `message`; returns whether [`Self::view`] may have changed.
    pub fn dispatch(&mut self, message: Message) -> bool {
        match message {
            Message::Tick => {
                let before = self.typewriter.text().to_string();
                self.typewriter.tick() != before
            }
            Message::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.persistence.save(self.theme);
                log_event(
                    &self.log,
                    LogLevel::Info,
                    "theme.toggled",
                    json!({ "theme": self.theme }),
                );
                true
            }
            Message::ToggleMenu => {
                self.menu.toggle();
                true
            }
            Message::CloseMenu => self.menu.close(),
            Message::Navigate(id) => {
                let menu_was_open = self.menu.is_open();
                self.navigator.go_to(id, &mut self.menu) && menu_was_open
            }
            Message::Scrolled(metrics) => self.scroll.update(metrics),
            Message::Resized { width } => self.menu.on_resize(width),
        }
    }

    pub fn view(&self) -> PortfolioView {
        PortfolioView {
            typed_text: self.typewriter.text().to_string(),
            theme: self.theme,
            progress: self.scroll.progress(),
            menu_open: self.menu.is_open(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn anchor(&self, id: SectionId) -> Option<&A> {
        self.navigator.anchor(id)
    }

    /// Restarts the typewriter on a new role list; the caller re-arms its ticker.
    pub fn replace_roles(&mut self, roles: RoleList) -> bool {
        self.typewriter.replace_roles(roles)
    }
}
