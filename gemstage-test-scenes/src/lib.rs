pub mod expectations;
pub mod scene;

pub use expectations::{
    check_frame, facing_shade, Expected, Frame, PixelExpectation, Rgba, SceneInputs,
};
pub use scene::{
    far_camera_expectations, near_camera_expectations, quadrant_image, CANVAS_HEIGHT,
    CANVAS_WIDTH, FAR_CAMERA_OFFSET, NEAR_CAMERA_OFFSET,
};
