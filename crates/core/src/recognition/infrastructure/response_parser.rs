use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::recognition::domain::acknowledgement::Acknowledgement;
use crate::recognition::domain::detected_face::{DetectedFace, FacePosition};
use crate::recognition::domain::identify_result::{Candidate, IdentifyResult};
use crate::request::domain::operation::Operation;
use crate::shared::constants::CONFIDENCE_PERCENT_SCALE;
use crate::shared::error::{FaceApiError, RemoteError, RemoteErrorKind};
use crate::training::domain::train_session::{SessionInfo, TrainStatus};
use crate::transport::domain::transport::TransportResponse;

const STALE_MODEL_MARKERS: &[&str] = &["NOT_TRAINED", "TRAIN_EXPIRED"];

#[derive(Deserialize)]
struct ErrorWire {
    error: Option<String>,
    error_code: Option<i64>,
}

#[derive(Deserialize)]
struct PointWire {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct PositionWire {
    center: Option<PointWire>,
    width: Option<f64>,
    height: Option<f64>,
}

#[derive(Deserialize)]
struct FaceWire {
    face_id: Option<String>,
    position: Option<PositionWire>,
}

#[derive(Deserialize)]
struct DetectWire {
    face: Option<Vec<FaceWire>>,
}

#[derive(Deserialize)]
struct PersonCreateWire {
    person_id: Option<String>,
}

#[derive(Deserialize)]
struct AckWire {
    success: Option<bool>,
    added: Option<u64>,
    removed: Option<u64>,
    deleted: Option<u64>,
}

#[derive(Deserialize)]
struct SessionIdWire {
    session_id: Option<String>,
}

#[derive(Deserialize)]
struct SessionWire {
    session_id: Option<String>,
    status: Option<String>,
    result: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct CandidateWire {
    person_id: Option<String>,
    person_name: Option<String>,
    confidence: Option<f64>,
}

#[derive(Deserialize)]
struct IdentifyFaceWire {
    face_id: Option<String>,
    candidate: Option<Vec<CandidateWire>>,
}

#[derive(Deserialize)]
struct IdentifyWire {
    face: Option<Vec<IdentifyFaceWire>>,
}

/// Turns a non-success answer into a remote error, and any answer into `T`.
fn decode<T: DeserializeOwned>(
    operation: Operation,
    response: &TransportResponse,
) -> Result<T, FaceApiError> {
    if let Ok(ErrorWire { error, error_code }) = serde_json::from_str::<ErrorWire>(&response.body) {
        if error.is_some() || error_code.is_some() {
            return Err(RemoteError::new(
                operation,
                response.status,
                error_code,
                error.unwrap_or_default(),
            )
            .into());
        }
    }
    if !response.is_success() {
        return Err(FaceApiError::shape(
            operation,
            format!("HTTP {} without a parseable error body", response.status),
        ));
    }
    serde_json::from_str(&response.body)
        .map_err(|e| FaceApiError::shape(operation, format!("invalid JSON: {e}")))
}

fn missing(operation: Operation, path: &str) -> FaceApiError {
    FaceApiError::shape(operation, format!("missing `{path}`"))
}

/// Every face the remote detected, in remote order. Strict: each face
/// must carry a `face_id`.
pub fn parse_detect(response: &TransportResponse) -> Result<Vec<DetectedFace>, FaceApiError> {
    let op = Operation::DetectionDetect;
    let wire: DetectWire = decode(op, response)?;
    let faces = wire.face.ok_or_else(|| missing(op, "face"))?;

    faces
        .into_iter()
        .enumerate()
        .map(|(i, face)| -> Result<DetectedFace, FaceApiError> {
            let face_id = face
                .face_id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| missing(op, &format!("face[{i}].face_id")))?;
            let position = face.position.and_then(|p| {
                let center = p.center?;
                Some(FacePosition {
                    center_x: center.x,
                    center_y: center.y,
                    width: p.width?,
                    height: p.height?,
                })
            });
            Ok(DetectedFace { face_id, position })
        })
        .collect()
}

/// Id of the first detected face, or `None` when the remote found none.
/// Faces after the first are not inspected.
pub fn parse_first_face_id(response: &TransportResponse) -> Result<Option<String>, FaceApiError> {
    let op = Operation::DetectionDetect;
    let wire: DetectWire = decode(op, response)?;
    let faces = wire.face.ok_or_else(|| missing(op, "face"))?;
    match faces.into_iter().next() {
        None => Ok(None),
        Some(face) => face
            .face_id
            .filter(|id| !id.is_empty())
            .map(Some)
            .ok_or_else(|| missing(op, "face[0].face_id")),
    }
}

pub fn parse_person_create(response: &TransportResponse) -> Result<String, FaceApiError> {
    let op = Operation::PersonCreate;
    let wire: PersonCreateWire = decode(op, response)?;
    wire.person_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| missing(op, "person_id"))
}

pub fn parse_ack(
    operation: Operation,
    response: &TransportResponse,
) -> Result<Acknowledgement, FaceApiError> {
    let wire: AckWire = decode(operation, response)?;
    acknowledge(operation, response.status, wire)
}

/// Like [`parse_ack`], but a reported count of zero means the target did
/// not exist. That wins over the `success` flag, since the remote also
/// sends `success:false` alongside the zero.
pub fn parse_removal(
    operation: Operation,
    response: &TransportResponse,
) -> Result<Acknowledgement, FaceApiError> {
    let wire: AckWire = decode(operation, response)?;
    if wire.removed.or(wire.deleted) == Some(0) {
        return Err(RemoteError {
            operation,
            http_status: response.status,
            error_code: None,
            message: "nothing was removed".to_string(),
            kind: RemoteErrorKind::NotFound,
        }
        .into());
    }
    acknowledge(operation, response.status, wire)
}

fn acknowledge(
    operation: Operation,
    http_status: u16,
    wire: AckWire,
) -> Result<Acknowledgement, FaceApiError> {
    if wire.success == Some(false) {
        return Err(RemoteError::new(
            operation,
            http_status,
            None,
            "remote reported success=false",
        )
        .into());
    }
    Ok(Acknowledgement {
        affected: wire.added.or(wire.removed).or(wire.deleted),
    })
}

pub fn parse_train_submit(response: &TransportResponse) -> Result<String, FaceApiError> {
    let op = Operation::TrainIdentify;
    let wire: SessionIdWire = decode(op, response)?;
    wire.session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| missing(op, "session_id"))
}

pub fn parse_session(response: &TransportResponse) -> Result<SessionInfo, FaceApiError> {
    let op = Operation::InfoGetSession;
    let wire: SessionWire = decode(op, response)?;
    let session_id = wire.session_id.ok_or_else(|| missing(op, "session_id"))?;
    let status = wire.status.ok_or_else(|| missing(op, "status"))?;
    Ok(SessionInfo {
        session_id,
        status: TrainStatus::parse(&status),
        detail: wire
            .result
            .filter(|v| !v.is_null())
            .map(|v| v.to_string()),
    })
}

/// Parses an identify answer for `group`. Confidences arrive in percent and
/// are returned in `[0, 1]`. A remote complaint that the
/// group's model is missing or outdated becomes [`FaceApiError::StaleModel`].
pub fn parse_identify(
    group: &str,
    response: &TransportResponse,
) -> Result<IdentifyResult, FaceApiError> {
    let op = Operation::RecognitionIdentify;
    let wire: IdentifyWire = decode(op, response).map_err(|e| stale_model_or(group, e))?;
    let mut faces = wire.face.ok_or_else(|| missing(op, "face"))?;
    if faces.is_empty() {
        return Err(FaceApiError::NoFaceDetected);
    }
    let face = faces.swap_remove(0);
    let candidates = face
        .candidate
        .ok_or_else(|| missing(op, "face[0].candidate"))?
        .into_iter()
        .enumerate()
        .map(|(i, c)| -> Result<Candidate, FaceApiError> {
            Ok(Candidate {
                person_id: c
                    .person_id
                    .ok_or_else(|| missing(op, &format!("face[0].candidate[{i}].person_id")))?,
                person_name: c.person_name,
                confidence: c
                    .confidence
                    .map(|percent| (percent / CONFIDENCE_PERCENT_SCALE).clamp(0.0, 1.0))
                    .ok_or_else(|| missing(op, &format!("face[0].candidate[{i}].confidence")))?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IdentifyResult::new(face.face_id, candidates))
}

fn stale_model_or(group: &str, error: FaceApiError) -> FaceApiError {
    match error {
        FaceApiError::Remote(remote) if is_stale_model(&remote.message) => FaceApiError::StaleModel {
            group: group.to_string(),
            detail: remote.message,
        },
        other => other,
    }
}

fn is_stale_model(message: &str) -> bool {
    let upper = message.to_ascii_uppercase();
    STALE_MODEL_MARKERS.iter().any(|m| upper.contains(m))
}
