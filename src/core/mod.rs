pub mod curve;
pub mod density;
pub mod geometry;
pub mod kernel;
pub mod scale;
pub mod types;

pub use curve::{PathBuilder, curve_basis, curve_monotone_x, symbol_triangle};
pub use density::KernelDensity;
pub use geometry::{DENSITY_TICK_COUNT, DensityGeometry, GeometryInput, PointerAnchor};
pub use kernel::Kernel;
pub use scale::LinearScale;
pub use types::{CurvePoint, Extent, Margin, extent};
