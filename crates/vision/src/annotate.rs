// SPDX-License-Identifier: Apache-2.0

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: Image,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct Image {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl AnnotateRequest {
    /// A single-image `TEXT_DETECTION` request; the wire format carries
    /// the image base64-encoded.
    pub(crate) fn text_detection(image: &[u8]) -> Self {
        Self {
            requests: vec![ImageRequest {
                image: Image {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateResult>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnnotateResult {
    #[serde(default, rename = "textAnnotations")]
    pub text_annotations: Vec<Annotation>,

    pub error: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Annotation {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Status {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn text_detection_request() {
        let req = AnnotateRequest::text_detection(b"png");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "requests": [{
                    "image": { "content": "cG5n" },
                    "features": [{ "type": "TEXT_DETECTION" }],
                }]
            })
        );
    }

    #[test]
    fn response_with_annotations() {
        let res: AnnotateResponse = serde_json::from_value(json!({
            "responses": [{
                "textAnnotations": [
                    { "description": "FULL TEXT" },
                    { "description": "FULL" },
                ]
            }]
        }))
        .unwrap();
        let first = &res.responses[0];
        assert!(first.error.is_none());
        assert_eq!(first.text_annotations[0].description, "FULL TEXT");
    }

    #[test]
    fn response_with_error() {
        let res: AnnotateResponse = serde_json::from_value(json!({
            "responses": [{
                "error": { "code": 7, "message": "permission denied" }
            }]
        }))
        .unwrap();
        let first = &res.responses[0];
        assert!(first.text_annotations.is_empty());
        let error = first.error.as_ref().unwrap();
        assert_eq!(error.code, 7);
        assert_eq!(error.message, "permission denied");
    }

    #[test]
    fn empty_response() {
        let res: AnnotateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(res.responses.is_empty());

        let res: AnnotateResponse = serde_json::from_value(json!({
            "responses": [{}]
        }))
        .unwrap();
        assert!(res.responses[0].text_annotations.is_empty());
        assert!(res.responses[0].error.is_none());
    }
}
