//! Terminal rendering for the voxterm engine.
//!
//! The world is drawn by casting one ray per character cell into a
//! [`Framebuffer`], then overlays (HUD, debug text, minimap) are painted on
//! top. [`FramebufferWidget`] hands the finished frame to ratatui.

pub mod camera;
pub mod framebuffer;
pub mod overlay;
pub mod renderer;
pub mod shading;
pub mod widget;

pub use camera::CameraBasis;
pub use framebuffer::{Cell, Framebuffer};
pub use overlay::Overlays;
pub use renderer::Renderer;
pub use shading::{hit_color, hit_glyph};
pub use widget::FramebufferWidget;
