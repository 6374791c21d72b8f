/// Face bounding box, expressed in percent of the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePosition {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

/// A face the remote found in a submitted image.
///
/// The id stays valid until the remote purges the image it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedFace {
    pub face_id: String,
    pub position: Option<FacePosition>,
}
