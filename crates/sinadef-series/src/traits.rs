//! Renderer trait for turning a finished chart into an image.

use crate::pipeline::ChartSpec;
use sinadef_common::Result;
use std::path::Path;

/// Trait for chart renderers.
///
/// A renderer only draws what the [`ChartSpec`] describes; segmentation and
/// axis derivation have already happened.
pub trait ChartRenderer {
    /// Renders `chart` to the image file at `path`.
    fn render_to_file(&self, chart: &ChartSpec, path: &Path) -> Result<()>;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;
}
