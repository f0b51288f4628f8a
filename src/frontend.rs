use folio::{
    coordinator::{Message, PortfolioCoordinator},
    scroll::ScrollMetrics,
    sections::{Anchor, AnchorRegistry, SectionId},
    telemetry::LogConfig,
    theme::{StorageError, Theme, ThemeStore},
    typewriter::{RoleList, TICK_PERIOD_MS},
};
use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use js_sys::{Date, Function, Reflect};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, HtmlAnchorElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Storage,
};
use yew::prelude::*;

const ROLES: [&str; 4] = [
    "Analog IC Designer",
    "VLSI & Embedded Enthusiast",
    "PLL • VCO • PFD Focus",
    "LNA / RF Curious",
];
const CV_PATH: &str = "/CV_SOUMYAJIT_MANDAL.pdf";
const CV_FILENAME: &str = "CV_SOUMYAJIT_MANDAL.pdf";

type Coordinator = PortfolioCoordinator<BrowserThemeStore, SectionAnchor>;

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

struct BrowserThemeStore;

impl ThemeStore for BrowserThemeStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|err| StorageError::rejected(key, format!("{err:?}")))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::rejected(key, format!("{err:?}")))
    }
}

#[derive(Clone, Default, PartialEq)]
struct SectionAnchor(NodeRef);

impl Anchor for SectionAnchor {
    fn scroll_into_view(&self) -> bool {
        let Some(element) = self.0.cast::<Element>() else {
            return false;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

fn apply_theme(theme: Theme) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Some(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn scroll_metrics() -> Option<ScrollMetrics> {
    let win = window()?;
    let root = win.document()?.document_element()?;

    Some(ScrollMetrics {
        offset: win.scroll_y().unwrap_or(0.0),
        viewport_height: f64::from(root.client_height()),
        content_height: f64::from(root.scroll_height()),
    })
}

fn viewport_width() -> f64 {
    window()
        .and_then(|win| win.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0)
}

fn download_asset(path: &str, filename: &str) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let Some(link) = document
        .create_element("a")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlAnchorElement>().ok())
    else {
        return;
    };

    link.set_href(path);
    link.set_download(filename);
    link.click();
}

#[derive(Properties, PartialEq)]
struct CardProps {
    title: AttrValue,
    description: AttrValue,
}

#[function_component(Card)]
fn card(props: &CardProps) -> Html {
    html! {
        <article class="card">
            <h3 class="card-title">{props.title.clone()}</h3>
            <p class="muted">{props.description.clone()}</p>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    label: AttrValue,
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a class="pill-link" href={props.href.clone()} target="_blank" rel="noopener noreferrer">
            {props.label.clone()}
            <span class="external-mark" aria-hidden="true">{"↗"}</span>
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    roles: RoleList,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let coordinator: Rc<RefCell<Coordinator>> = {
        let roles = props.roles.clone();
        use_mut_ref(move || {
            PortfolioCoordinator::mount(
                roles,
                BrowserThemeStore,
                AnchorRegistry::build(|_| SectionAnchor::default()),
                LogConfig::default(),
            )
        })
    };
    let view = {
        let coordinator = coordinator.clone();
        use_state_eq(move || coordinator.borrow().view())
    };

    let dispatch = {
        let coordinator = coordinator.clone();
        let view = view.clone();
        Callback::from(move |message: Message| {
            let next = {
                let mut coordinator = coordinator.borrow_mut();
                coordinator.dispatch(message).then(|| coordinator.view())
            };
            if let Some(next) = next {
                view.set(next);
            }
        })
    };

    {
        let current = view.theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    {
        let coordinator = coordinator.clone();
        let dispatch = dispatch.clone();
        use_effect_with(props.roles.clone(), move |roles| {
            coordinator.borrow_mut().replace_roles(roles.clone());
            let ticker = Interval::new(TICK_PERIOD_MS, move || dispatch.emit(Message::Tick));
            move || drop(ticker)
        });
    }

    {
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| {
            let listeners = window().map(|win| {
                let on_scroll = {
                    let dispatch = dispatch.clone();
                    EventListener::new(&win, "scroll", move |_| {
                        if let Some(metrics) = scroll_metrics() {
                            dispatch.emit(Message::Scrolled(metrics));
                        }
                    })
                };
                let on_resize = {
                    let dispatch = dispatch.clone();
                    EventListener::new(&win, "resize", move |_| {
                        dispatch.emit(Message::Resized {
                            width: viewport_width(),
                        });
                    })
                };
                (on_scroll, on_resize)
            });

            if let Some(metrics) = scroll_metrics() {
                dispatch.emit(Message::Scrolled(metrics));
            }

            move || drop(listeners)
        });
    }

    let on_toggle_theme = {
        let coordinator = coordinator.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch.emit(Message::ToggleTheme);
            apply_theme_with_transition(coordinator.borrow().theme());
        })
    };

    let on_toggle_menu = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(Message::ToggleMenu))
    };

    let navigate = {
        let dispatch = dispatch.clone();
        move |id: SectionId| {
            let dispatch = dispatch.clone();
            Callback::from(move |_: MouseEvent| dispatch.emit(Message::Navigate(id)))
        }
    };

    let on_download_cv = Callback::from(|_: MouseEvent| download_asset(CV_PATH, CV_FILENAME));

    let anchor = |id: SectionId| {
        coordinator
            .borrow()
            .anchor(id)
            .map(|anchor| anchor.0.clone())
            .unwrap_or_default()
    };

    let nav_buttons = |class: &'static str| {
        SectionId::ALL
            .into_iter()
            .map(|id| {
                html! {
                    <button type="button" class={class} onclick={navigate(id)}>{id.label()}</button>
                }
            })
            .collect::<Html>()
    };

    let theme = view.theme;
    let progress_style = format!("transform: scaleX({:.4});", view.progress);

    html! {
        <div class="page-shell">
            <div class="scroll-progress" style={progress_style} aria-hidden="true" />

            <nav class="site-nav">
                <div class="nav-inner">
                    <span class="brand">{"SM."}</span>
                    <div class="nav-desktop">
                        {nav_buttons("nav-link")}
                        <button
                            class="theme-toggle"
                            type="button"
                            aria-label={theme.toggle_label()}
                            aria-pressed={theme.is_dark().to_string()}
                            onclick={on_toggle_theme.clone()}
                        >
                            <span aria-hidden="true">{theme.icon()}</span>
                        </button>
                    </div>
                    <button
                        class="menu-toggle"
                        type="button"
                        aria-label="Toggle navigation"
                        aria-expanded={view.menu_open.to_string()}
                        onclick={on_toggle_menu}
                    >
                        {if view.menu_open { "✕" } else { "☰" }}
                    </button>
                </div>
                if view.menu_open {
                    <div class="nav-mobile">
                        {nav_buttons("nav-link")}
                        <button class="nav-link" type="button" onclick={on_toggle_theme}>
                            {theme.toggle_label()}
                        </button>
                    </div>
                }
            </nav>

            <main id="content">
                <section ref={anchor(SectionId::Home)} class="section-block hero">
                    <h1>{"Hi, I’m "}<span class="accent">{"Soumyajit Mandal"}</span></h1>
                    <p class="typed muted">
                        {view.typed_text.clone()}
                        <span class="caret" aria-hidden="true">{"|"}</span>
                    </p>
                    <div class="hero-actions">
                        <button type="button" class="button-solid" onclick={navigate(SectionId::Projects)}>
                            {"View My Work"}
                        </button>
                        <button type="button" class="button-outline" onclick={navigate(SectionId::Contact)}>
                            {"Contact Me"}
                        </button>
                    </div>
                </section>

                <section ref={anchor(SectionId::About)} class="section-block">
                    <h2>{"About Me"}</h2>
                    <p class="muted">
                        {"Pursuing a career in VLSI design with focus on Analog Integrated Circuits. "}
                        {"Proficient in Cadence Virtuoso, hands-on experience with high-performance analog circuits."}
                    </p>
                    <button type="button" class="button-solid" onclick={on_download_cv}>{"Download CV"}</button>
                </section>

                <section ref={anchor(SectionId::Education)} class="section-block">
                    <h2>{"Education"}</h2>
                    <div class="card-grid">
                        <Card title="M.Tech, DIAT (DU), DRDO" description="VLSI & Embedded Systems (2024–2026)" />
                        <Card title="B.Tech, Cooch Behar Govt. Engg. College" description="Electronics and Communication Engineering (2020–2024), CGPA: 8.23" />
                        <Card title="Higher Secondary, Malda Zilla School" description="Science (PCMB) (2018–2020), 80%" />
                    </div>
                </section>

                <section ref={anchor(SectionId::Skills)} class="section-block">
                    <h2>{"Skills"}</h2>
                    <p class="muted">{"Cadence Virtuoso, PLL/VCO/PFD Design, Layout Basics, MATLAB/Python, Embedded C"}</p>
                </section>

                <section ref={anchor(SectionId::Projects)} class="section-block">
                    <h2>{"Projects"}</h2>
                    <div class="card-grid">
                        <Card title="Design of High-Performance PFDs & VCOs for PLL Applications" description="Optimizing PLL performance with precision frequency synthesis." />
                        <Card title="Vehicle Horn Blow Detection, Recording and Reporting System" description="Detection and reporting using SMTP server." />
                        <Card title="Basic Analog IC Design Using Cadence Virtuoso Platform" description="Hands-on analog design training." />
                    </div>
                </section>

                <section ref={anchor(SectionId::Certifications)} class="section-block">
                    <h2>{"Certifications"}</h2>
                    <div class="card-grid">
                        <Card title="Coder’s Python" description="06/2021" />
                        <Card title="Artificial Intelligence by Remarkskill & IITKGP" description="01/2023" />
                        <Card title="Basic Analog IC Design Using Cadence Virtuoso Platform" description="08/2023" />
                        <Card title="Advanced Entrepreneurship-Cum-Skill Development Programme" description="Nano Scale VLSI Design for MSME sectors (03/2024)" />
                    </div>
                </section>

                <section ref={anchor(SectionId::Contact)} class="section-block">
                    <h2>{"Contact"}</h2>
                    <p class="muted">{"Email: contact.isoumyajitmandal@gmail.com | Phone: +91 6297338422"}</p>
                    <div class="link-row">
                        <ExternalLink href="https://www.linkedin.com/in/soumyajit-m-95295a20a/" label="LinkedIn" />
                        <ExternalLink href="https://github.com/" label="GitHub" />
                        <ExternalLink href="https://www.researchgate.net/profile/Soumyajit-Mandal-5" label="ResearchGate" />
                    </div>
                </section>
            </main>

            <footer class="site-footer">
                <p class="muted">{format!("© {} Soumyajit Mandal. All rights reserved.", Date::new_0().get_full_year())}</p>
            </footer>
        </div>
    }
}

pub fn run() {
    let roles = RoleList::new(ROLES).expect("role list must not be empty");

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps { roles },
    )
    .render();
}
