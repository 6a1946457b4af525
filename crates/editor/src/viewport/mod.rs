//! Camera, mesh buffers and picking. Host renderers consume these through
//! [`crate::controller::RenderItem`].

pub mod camera;
pub mod edge;
pub mod mesh;
pub mod picking;
