//! Host-side integration: mounting, prop changes and debounced resizes.

mod container;
mod debounce;
mod window;

pub use container::{
    CONTAINER_CLASS, ChartContainer, ContainerConfig, INITIAL_BANDWIDTH, INITIAL_POINT,
    MOUNT_POINT_ID,
};
pub use debounce::{DEFAULT_RESIZE_DEBOUNCE, Debouncer};
pub use window::{ListenerId, ResizeSubscription, WindowEvents};
