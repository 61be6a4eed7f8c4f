use skyisle_core::Result;
use skyisle_scene::{CameraRig, Scene};

/// Consumer of the finished frame.
///
/// Called once per frame after motion and world matrices are up to date.
/// Implementations only read the scene.
pub trait RenderStep {
    fn render(&mut self, scene: &Scene, camera: &CameraRig) -> Result<()>;
}

/// Render step that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderStep for NullRenderer {
    fn render(&mut self, _scene: &Scene, _camera: &CameraRig) -> Result<()> {
        Ok(())
    }
}
