use chrono::{Duration, NaiveDateTime};

pub const MIN_PIXELS_PER_HOUR: f32 = 4.0;
pub const MAX_PIXELS_PER_HOUR: f32 = 400.0;

/// Controls what the timeline header ticks mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineScale {
    Hours,
    Days,
}

/// Manages the visible window of the timeline.
///
/// The window starts at `start` and extends as far as the canvas is wide.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible instant.
    pub start: NaiveDateTime,
    /// Current header scale.
    pub scale: TimelineScale,
    /// Pixels per hour (controls zoom level).
    pub pixels_per_hour: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDateTime, pixels_per_hour: f32) -> Self {
        Self {
            start,
            scale: TimelineScale::Hours,
            pixels_per_hour: pixels_per_hour.clamp(MIN_PIXELS_PER_HOUR, MAX_PIXELS_PER_HOUR),
        }
    }

    /// Convert an instant to an x-pixel offset from the window start.
    pub fn time_to_x(&self, time: NaiveDateTime) -> f32 {
        let seconds = (time - self.start).num_seconds() as f32;
        seconds / 3600.0 * self.pixels_per_hour
    }

    /// Convert an x-pixel offset back to an instant (whole seconds).
    pub fn x_to_time(&self, x: f32) -> NaiveDateTime {
        let seconds = (x / self.pixels_per_hour * 3600.0).round() as i64;
        self.start + Duration::seconds(seconds)
    }

    /// The instant at the right edge of a canvas `width` pixels wide.
    pub fn end(&self, width: f32) -> NaiveDateTime {
        self.x_to_time(width)
    }

    /// Zoom in, keeping the instant under `anchor_x` in place.
    pub fn zoom_in(&mut self, anchor_x: f32) {
        self.zoom_by(1.2, anchor_x);
    }

    /// Zoom out, keeping the instant under `anchor_x` in place.
    pub fn zoom_out(&mut self, anchor_x: f32) {
        self.zoom_by(1.0 / 1.2, anchor_x);
    }

    /// Scale pixels-per-hour by `factor`, keeping the instant under
    /// `anchor_x` in place.
    pub fn zoom_by(&mut self, factor: f32, anchor_x: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.x_to_time(anchor_x);
        self.pixels_per_hour =
            (self.pixels_per_hour * factor).clamp(MIN_PIXELS_PER_HOUR, MAX_PIXELS_PER_HOUR);
        let seconds = (anchor_x / self.pixels_per_hour * 3600.0).round() as i64;
        self.start = anchor - Duration::seconds(seconds);
    }

    /// Shift the window by a pixel distance; positive moves later in time.
    pub fn pan_pixels(&mut self, dx: f32) {
        let seconds = (dx / self.pixels_per_hour * 3600.0).round() as i64;
        self.start += Duration::seconds(seconds);
    }

    /// Place `time` in the middle of a canvas `width` pixels wide.
    pub fn center_on(&mut self, time: NaiveDateTime, width: f32) {
        let seconds = (width / 2.0 / self.pixels_per_hour * 3600.0).round() as i64;
        self.start = time - Duration::seconds(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn time_and_x_convert_both_ways() {
        let viewport = TimelineViewport::new(at(0), 30.0);
        assert_eq!(viewport.time_to_x(at(2)), 60.0);
        assert_eq!(viewport.x_to_time(90.0), at(3));
        assert_eq!(viewport.end(300.0), at(10));
    }

    #[test]
    fn zoom_keeps_anchor_fixed_and_clamps() {
        let mut viewport = TimelineViewport::new(at(0), 30.0);
        viewport.zoom_in(120.0);
        assert_eq!(viewport.x_to_time(120.0), at(4));

        for _ in 0..100 {
            viewport.zoom_out(0.0);
        }
        assert_eq!(viewport.pixels_per_hour, MIN_PIXELS_PER_HOUR);
    }

    #[test]
    fn zoom_by_applies_the_given_factor_once() {
        let mut viewport = TimelineViewport::new(at(0), 40.0);
        viewport.zoom_by(1.05, 80.0);
        assert!((viewport.pixels_per_hour - 42.0).abs() < 1e-4);
        assert_eq!(viewport.x_to_time(80.0), at(2));

        viewport.zoom_by(0.0, 80.0);
        viewport.zoom_by(f32::NAN, 80.0);
        assert!((viewport.pixels_per_hour - 42.0).abs() < 1e-4);
    }

    #[test]
    fn pan_and_center_move_the_window() {
        let mut viewport = TimelineViewport::new(at(0), 10.0);
        viewport.pan_pixels(20.0);
        assert_eq!(viewport.start, at(2));

        viewport.center_on(at(12), 100.0);
        assert_eq!(viewport.start, at(7));
    }
}
