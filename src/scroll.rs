/// Smallest scrollable extent treated as scrollable at all.
const MIN_SCROLLABLE_EXTENT: f64 = 1e-6;

/// Position of the scroll container, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    pub fn progress(&self) -> f64 {
        let extent = self.content_height - self.viewport_height;

        if extent.is_nan() || extent <= MIN_SCROLLABLE_EXTENT || !self.offset.is_finite() {
            return 0.0;
        }

        (self.offset / extent.max(MIN_SCROLLABLE_EXTENT)).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollProgressTracker {
    progress: f64,
}

impl ScrollProgressTracker {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Recomputes progress from `metrics`; returns whether it moved.
    pub fn update(&mut self, metrics: ScrollMetrics) -> bool {
        let next = metrics.progress();
        if next == self.progress {
            return false;
        }
        self.progress = next;
        true
    }
}
