//! Behavioral core of the portfolio page: typewriter, theme persistence,
//! scroll progress, section navigation and the mobile menu, tied together by
//! [`coordinator::PortfolioCoordinator`]. Browser and server glue live in the
//! binary.

pub mod coordinator;
pub mod menu;
pub mod scroll;
pub mod sections;
pub mod telemetry;
pub mod theme;
pub mod typewriter;
