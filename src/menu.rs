/// Viewport width at which the desktop navigation replaces the mobile menu.
pub const DESKTOP_BREAKPOINT_PX: f64 = 768.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuController {
    open: bool,
}

impl MenuController {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether the menu was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn on_resize(&mut self, viewport_width: f64) -> bool {
        viewport_width >= DESKTOP_BREAKPOINT_PX && self.close()
    }
}
