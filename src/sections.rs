use crate::{
    menu::MenuController,
    telemetry::{log_event, LogConfig, LogLevel},
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Education,
    Skills,
    Projects,
    Certifications,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        Self::Home,
        Self::About,
        Self::Education,
        Self::Skills,
        Self::Projects,
        Self::Certifications,
        Self::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Certifications => "certifications",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
            Self::Certifications => "Certifications",
            Self::Contact => "Contact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == value)
    }
}

/// A scroll-targetable region of the page.
pub trait Anchor {
    /// Starts a smooth scroll bringing the region's top edge into view.
    /// Returns `false` when the region is not mounted.
    fn scroll_into_view(&self) -> bool;
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnchorRegistry<A> {
    anchors: BTreeMap<SectionId, A>,
}

impl<A> AnchorRegistry<A> {
    pub fn build(mut make: impl FnMut(SectionId) -> A) -> Self {
        Self::from_entries(SectionId::ALL.into_iter().map(|id| (id, make(id))))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (SectionId, A)>) -> Self {
        Self {
            anchors: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, id: SectionId) -> Option<&A> {
        self.anchors.get(&id)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

pub struct SectionNavigator<A> {
    registry: AnchorRegistry<A>,
    log: LogConfig,
}

impl<A: Anchor> SectionNavigator<A> {
    pub fn new(registry: AnchorRegistry<A>, log: LogConfig) -> Self {
        Self { registry, log }
    }

    pub fn anchor(&self, id: SectionId) -> Option<&A> {
        self.registry.get(id)
    }

    /// Scrolls to `id` and closes the menu. Unregistered ids are ignored and
    /// leave the menu untouched.
    pub fn go_to(&self, id: SectionId, menu: &mut MenuController) -> bool {
        let Some(anchor) = self.registry.get(id) else {
            log_event(
                &self.log,
                LogLevel::Debug,
                "navigation.unregistered",
                json!({ "section": id }),
            );
            return false;
        };

        let menu_was_open = menu.close();
        let mounted = anchor.scroll_into_view();
        log_event(
            &self.log,
            LogLevel::Debug,
            "navigation.requested",
            json!({ "section": id, "mounted": mounted, "menuClosed": menu_was_open }),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct RecordingAnchor {
        scrolls: Cell<usize>,
    }

    impl Anchor for RecordingAnchor {
        fn scroll_into_view(&self) -> bool {
            self.scrolls.set(self.scrolls.get() + 1);
            true
        }
    }

    fn open_menu() -> MenuController {
        let mut menu = MenuController::default();
        menu.toggle();
        menu
    }

    #[test]
    fn ids_round_trip_through_their_names() {
        for id in SectionId::ALL {
            assert_eq!(SectionId::parse(id.as_str()), Some(id));
        }
        assert_eq!(SectionId::parse("blog"), None);
    }

    #[test]
    fn registry_covers_every_section() {
        let registry = AnchorRegistry::build(|id| id.as_str().len());

        assert_eq!(registry.len(), SectionId::ALL.len());
        assert_eq!(registry.get(SectionId::Certifications), Some(&14));
    }

    #[test]
    fn navigation_closes_menu_for_every_target() {
        let navigator = SectionNavigator::new(
            AnchorRegistry::build(|_| RecordingAnchor::default()),
            LogConfig::default(),
        );

        for id in SectionId::ALL {
            let mut menu = open_menu();

            assert!(navigator.go_to(id, &mut menu));
            assert!(!menu.is_open());
            assert_eq!(navigator.anchor(id).map(|anchor| anchor.scrolls.get()), Some(1));
        }
    }

    #[test]
    fn navigation_from_closed_menu_keeps_it_closed() {
        let navigator = SectionNavigator::new(
            AnchorRegistry::build(|_| RecordingAnchor::default()),
            LogConfig::default(),
        );
        let mut menu = MenuController::default();

        assert!(navigator.go_to(SectionId::Skills, &mut menu));
        assert!(!menu.is_open());
    }

    #[test]
    fn unregistered_section_is_a_no_op() {
        let navigator = SectionNavigator::new(
            AnchorRegistry::from_entries([(SectionId::Home, RecordingAnchor::default())]),
            LogConfig::default(),
        );
        let mut menu = open_menu();

        assert!(!navigator.go_to(SectionId::Contact, &mut menu));
        assert!(menu.is_open());
        assert_eq!(navigator.anchor(SectionId::Home).map(|anchor| anchor.scrolls.get()), Some(0));
    }
}
