use anyhow::Context as _;

use crate::const_config::client::CLIENT_PROCESSED_IMAGE_MIME;

/// Response of the predict endpoint
///
/// `detections` is kept as raw JSON because only the backend knows its exact
/// shape, see [`PredictionResponse::typed_detections`] for the known one
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct PredictionResponse {
    pub detections: serde_json::Value,
    /// Base64 encoded JPEG with the detections drawn on it
    pub processed_image: String,
}

/// The shape the backend currently uses for each detection
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Detection {
    pub class_name: String,
    pub confidence: f64,
    /// [x1, y1, x2, y2]
    #[serde(rename = "box")]
    pub bounding_box: Vec<i64>,
}

impl PredictionResponse {
    /// Detections as indented JSON (two spaces, same as the browser's
    /// `JSON.stringify(value, null, 2)`)
    pub fn detections_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.detections)
            .unwrap_or_else(|_| self.detections.to_string())
    }

    pub fn image_data_uri(&self) -> String {
        format!(
            "data:{CLIENT_PROCESSED_IMAGE_MIME};base64,{}",
            self.processed_image
        )
    }

    pub fn typed_detections(&self) -> anyhow::Result<Vec<Detection>> {
        serde_json::from_value(self.detections.clone())
            .context("detections do not match the known detection shape")
    }
}
