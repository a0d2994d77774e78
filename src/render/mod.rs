//! View rendering
//!
//! Builds the three dashboard views as plotly figures, served as JSON:
//! - 3D pressure surface over the synthetic structure map
//! - well-log depth profile plus table preview
//! - decline-curve forecast with a horizon marker
//!
//! The browser only draws what it receives; no chart logic lives client-side.

mod dashboard;
pub mod figure;
pub mod theme;

pub use dashboard::{
    DashboardRenderer, DashboardSnapshot, DeclineView, SurfaceView, TablePreview, WellLogView,
};
pub use figure::Figure;
