use crate::{
    ofx::{self, Status},
    property::PropertySet,
};

/// Opaque effect instance handle passed back to the plugin's main entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(pub usize);

/// The effect instance that owns a set of clip instances
///
/// Clips only ever call back into the effect; they never own it.
pub trait EffectInstance: Send + Sync {
    /// Call the plugin's single dispatch entry point
    ///
    /// # Arguments
    ///
    /// * `action` - Action name, e.g. [`ofx::ACTION_INSTANCE_CHANGED`]
    /// * `handle` - The effect's own handle, see [`EffectInstance::handle`]
    /// * `in_args` - Property set describing the action's inputs
    /// * `out_args` - Property set for the plugin to fill in
    ///
    /// # Returns
    ///
    /// Whatever status the plugin returned.
    fn main_entry(
        &self,
        action: &str,
        handle: EffectHandle,
        in_args: Option<&PropertySet>,
        out_args: Option<&mut PropertySet>,
    ) -> Status;

    /// Handle identifying this instance to the plugin
    fn handle(&self) -> EffectHandle;

    /// Whether a component layout is one of the chromatic layouts this host knows
    ///
    /// Hosts that add their own colour layouts override this.
    fn is_chromatic_component(&self, components: &str) -> bool {
        ofx::is_chromatic_component(components)
    }
}

/// Live values of a clip instance, supplied by the host
///
/// Every host computed clip property except the negotiated pixel depth and
/// components is answered by one of these methods, on every read.
pub trait ClipValues: Send + Sync {
    /// Bit depth the clip's images have before any mapping
    fn unmapped_bit_depth(&self) -> String;

    /// Components the clip's images have before any mapping
    fn unmapped_components(&self) -> String;

    /// Premultiplication state of the clip's images
    fn premult(&self) -> String;

    /// Pixel aspect ratio
    fn aspect_ratio(&self) -> f64;

    /// Frame rate of the clip
    fn frame_rate(&self) -> f64;

    /// First and last frame the clip can deliver
    fn frame_range(&self) -> (f64, f64);

    /// Fielding of the delivered images
    fn field_order(&self) -> String;

    /// Whether the clip is hooked up to anything
    fn connected(&self) -> bool;

    /// Frame rate before any mapping
    fn unmapped_frame_rate(&self) -> f64;

    /// Frame range before any mapping
    fn unmapped_frame_range(&self) -> (f64, f64);

    /// Whether images can be fetched at non integer times
    fn continuous_samples(&self) -> bool;

    /// Called after a plugin read of one of the clip's host computed values
    fn notify(&self, _name: &str, _is_single: bool, _index_or_n: usize) {}
}
