use crate::config::ClipDefaults;

use super::ClipValues;

/// Fixed clip values, for hosts and tools without a live timeline
impl ClipValues for ClipDefaults {
    fn unmapped_bit_depth(&self) -> String {
        self.unmapped_pixel_depth.clone()
    }

    fn unmapped_components(&self) -> String {
        self.unmapped_components.clone()
    }

    fn premult(&self) -> String {
        self.premultiplication.clone()
    }

    fn aspect_ratio(&self) -> f64 {
        self.pixel_aspect_ratio
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn frame_range(&self) -> (f64, f64) {
        (self.frame_range[0], self.frame_range[1])
    }

    fn field_order(&self) -> String {
        self.field_order.clone()
    }

    fn connected(&self) -> bool {
        self.connected
    }

    fn unmapped_frame_rate(&self) -> f64 {
        self.unmapped_frame_rate
    }

    fn unmapped_frame_range(&self) -> (f64, f64) {
        (self.unmapped_frame_range[0], self.unmapped_frame_range[1])
    }

    fn continuous_samples(&self) -> bool {
        self.continuous_samples
    }
}
