//! Sources where each geometry feature of a layer is one trajectory.

#[doc(hidden)]
pub mod collection;
#[doc(hidden)]
pub mod layer;
#[doc(hidden)]
pub mod source;

#[doc(inline)]
pub use collection::GeoJsonLayer;
#[doc(inline)]
pub use layer::{FeatureLayer, GeometryType, LayerFeature};
#[doc(inline)]
pub use source::FeatureSource;
