//! Test doubles shared by the unit tests: a scripted transport, a stateful
//! fake of the remote service, and a virtual clock.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::request::domain::operation::Operation;
use crate::request::domain::request_params::EncodedRequest;
use crate::training::domain::poll_clock::PollClock;
use crate::transport::domain::transport::{Transport, TransportError, TransportResponse};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation: Operation,
    pub url: String,
    pub fields: Vec<(String, String)>,
    pub image: Option<Vec<u8>>,
}

impl RecordedCall {
    fn from_request(request: &EncodedRequest<'_>) -> Self {
        Self {
            operation: request.operation,
            url: request.url.clone(),
            fields: request
                .fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            image: request.image.as_ref().map(|i| i.data.to_vec()),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

pub fn count_calls(calls: &CallLog, operation: Operation) -> usize {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.operation == operation)
        .count()
}

/// Replays canned responses in order and records every request.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    failure: Option<String>,
    pub calls: CallLog,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<TransportResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(vec![])
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &EncodedRequest<'_>) -> Result<TransportResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::from_request(request));
        if let Some(message) = &self.failure {
            return Err(TransportError::Unavailable(message.clone()));
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Unavailable("script exhausted".into()))
    }
}

#[derive(Default)]
struct FakeGroup {
    persons: HashSet<String>,
    generation: u64,
    trained_generation: Option<u64>,
}

#[derive(Default)]
struct FakeState {
    groups: HashMap<String, FakeGroup>,
    persons: HashMap<String, Vec<String>>,
    known_faces: HashSet<String>,
    face_owner: HashMap<String, String>,
    detect_overrides: HashMap<String, String>,
    /// Session id -> (group, generation at submit, polls so far).
    sessions: HashMap<String, (String, u64, usize)>,
    session_statuses: Vec<&'static str>,
    candidates: Vec<(String, f64)>,
    next_face: u32,
    next_person: u32,
    next_session: u32,
}

/// In-memory stand-in for the remote service.
///
/// Tracks groups, persons, face ownership and training freshness so
/// workflow ordering rules are enforced the way the real service does.
pub struct FakeFaceService {
    state: Mutex<FakeState>,
    pub calls: CallLog,
}

impl FakeFaceService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                session_statuses: vec!["SUCC"],
                ..FakeState::default()
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Raw detect body for one image URL instead of a freshly minted face.
    pub fn with_detect_body(self, url: &str, body: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .detect_overrides
            .insert(url.to_string(), body.to_string());
        self
    }

    /// Statuses returned by successive polls of a session; the last repeats.
    pub fn with_session_statuses(self, statuses: Vec<&'static str>) -> Self {
        self.state.lock().unwrap().session_statuses = statuses;
        self
    }

    /// Candidates with confidences in `[0, 1]`; served in percent like the
    /// real remote.
    pub fn with_candidates(self, candidates: &[(&str, f64)]) -> Self {
        self.state.lock().unwrap().candidates = candidates
            .iter()
            .map(|(id, c)| (id.to_string(), *c))
            .collect();
        self
    }

    fn handle(&self, call: &RecordedCall) -> TransportResponse {
        let mut state = self.state.lock().unwrap();
        let field = |name: &str| call.field(name).unwrap_or_default().to_string();
        match call.operation {
            Operation::DetectionDetect => {
                if let Some(body) = call.field("url").and_then(|u| state.detect_overrides.get(u)) {
                    return ok(body.clone());
                }
                state.next_face += 1;
                let face_id = format!("f{}", state.next_face);
                state.known_faces.insert(face_id.clone());
                ok(format!(
                    r#"{{"face":[{{"face_id":"{face_id}","position":{{"center":{{"x":50.0,"y":40.0}},"width":20.0,"height":30.0}}}}],"img_id":"img"}}"#
                ))
            }
            Operation::PersonCreate => {
                state.next_person += 1;
                let person_id = format!("p{}", state.next_person);
                state.persons.insert(person_id.clone(), Vec::new());
                ok(format!(
                    r#"{{"person_id":"{person_id}","person_name":"{}","added_face":0,"added_group":0}}"#,
                    field("person_name")
                ))
            }
            Operation::PersonDelete => {
                let person_id = field("person_id");
                let Some(faces) = state.persons.remove(&person_id) else {
                    return error(400, "PERSON_NOT_FOUND", 1005);
                };
                for face in faces {
                    state.face_owner.remove(&face);
                }
                for group in state.groups.values_mut() {
                    if group.persons.remove(&person_id) {
                        group.generation += 1;
                    }
                }
                ok(r#"{"deleted":1,"success":true}"#)
            }
            Operation::PersonAddFace => {
                let person_id = field("person_id");
                let face_id = field("face_id");
                if !state.persons.contains_key(&person_id) {
                    return error(400, "PERSON_NOT_FOUND", 1005);
                }
                if !state.known_faces.contains(&face_id) || state.face_owner.contains_key(&face_id) {
                    return error(400, "INVALID_FACE_ID", 1005);
                }
                state.face_owner.insert(face_id.clone(), person_id.clone());
                if let Some(faces) = state.persons.get_mut(&person_id) {
                    faces.push(face_id);
                }
                touch_groups_of(&mut state, &person_id);
                ok(r#"{"added":1,"success":true}"#)
            }
            Operation::PersonRemoveFace => {
                let person_id = field("person_id");
                let face_id = field("face_id");
                if state.face_owner.get(&face_id) != Some(&person_id) {
                    return ok(r#"{"removed":0,"success":true}"#);
                }
                state.face_owner.remove(&face_id);
                if let Some(faces) = state.persons.get_mut(&person_id) {
                    faces.retain(|f| f != &face_id);
                }
                touch_groups_of(&mut state, &person_id);
                ok(r#"{"removed":1,"success":true}"#)
            }
            Operation::GroupCreate => {
                let name = field("group_name");
                if state.groups.contains_key(&name) {
                    return error(400, "NAME_EXIST", 1503);
                }
                state.groups.insert(name.clone(), FakeGroup::default());
                ok(format!(r#"{{"group_name":"{name}","added_person":0}}"#))
            }
            Operation::GroupDelete => match state.groups.remove(&field("group_name")) {
                Some(_) => ok(r#"{"deleted":1,"success":true}"#),
                None => error(400, "GROUP_NOT_FOUND", 1005),
            },
            Operation::GroupAddPerson => {
                let person_id = field("person_id");
                if !state.persons.contains_key(&person_id) {
                    return error(400, "PERSON_NOT_FOUND", 1005);
                }
                let Some(group) = state.groups.get_mut(&field("group_name")) else {
                    return error(400, "GROUP_NOT_FOUND", 1005);
                };
                group.persons.insert(person_id);
                group.generation += 1;
                ok(r#"{"added":1,"success":true}"#)
            }
            Operation::GroupRemovePerson => {
                let person_id = field("person_id");
                let Some(group) = state.groups.get_mut(&field("group_name")) else {
                    return error(400, "GROUP_NOT_FOUND", 1005);
                };
                if !group.persons.remove(&person_id) {
                    return ok(r#"{"removed":0,"success":true}"#);
                }
                group.generation += 1;
                ok(r#"{"removed":1,"success":true}"#)
            }
            Operation::TrainIdentify => {
                let name = field("group_name");
                let Some(group) = state.groups.get(&name) else {
                    return error(400, "GROUP_NOT_FOUND", 1005);
                };
                let generation = group.generation;
                let has_faces = group
                    .persons
                    .iter()
                    .any(|p| state.persons.get(p).is_some_and(|f| !f.is_empty()));
                if !has_faces {
                    return error(400, "EMPTY_GROUP", 1006);
                }
                state.next_session += 1;
                let session_id = format!("s{}", state.next_session);
                state.sessions.insert(session_id.clone(), (name, generation, 0));
                ok(format!(r#"{{"session_id":"{session_id}"}}"#))
            }
            Operation::InfoGetSession => {
                let session_id = field("session_id");
                let statuses = state.session_statuses.clone();
                let Some((group, generation, polls)) = state.sessions.get_mut(&session_id) else {
                    return error(400, "SESSION_NOT_FOUND", 1005);
                };
                let status = statuses[(*polls).min(statuses.len() - 1)];
                *polls += 1;
                let (group, generation) = (group.clone(), *generation);
                if status == "SUCC" {
                    if let Some(g) = state.groups.get_mut(&group) {
                        g.trained_generation = Some(generation);
                    }
                }
                let result = if status == "SUCC" {
                    r#"{"success":true}"#
                } else {
                    "null"
                };
                ok(format!(
                    r#"{{"session_id":"{session_id}","status":"{status}","result":{result}}}"#
                ))
            }
            Operation::RecognitionIdentify => {
                let Some(group) = state.groups.get(&field("group_name")) else {
                    return error(400, "GROUP_NOT_FOUND", 1005);
                };
                if group.trained_generation != Some(group.generation) {
                    return error(400, "GROUP_NOT_TRAINED", 1601);
                }
                let candidates: Vec<String> = state
                    .candidates
                    .iter()
                    .map(|(id, c)| {
                        let percent = c * 100.0;
                        format!(r#"{{"person_id":"{id}","person_name":"","confidence":{percent},"tag":""}}"#)
                    })
                    .collect();
                ok(format!(
                    r#"{{"face":[{{"face_id":"q1","candidate":[{}]}}]}}"#,
                    candidates.join(",")
                ))
            }
        }
    }
}

impl Transport for FakeFaceService {
    fn send(&self, request: &EncodedRequest<'_>) -> Result<TransportResponse, TransportError> {
        let call = RecordedCall::from_request(request);
        self.calls.lock().unwrap().push(call.clone());
        Ok(self.handle(&call))
    }
}

fn touch_groups_of(state: &mut FakeState, person_id: &str) {
    for group in state.groups.values_mut() {
        if group.persons.contains(person_id) {
            group.generation += 1;
        }
    }
}

fn ok(body: impl Into<String>) -> TransportResponse {
    TransportResponse::new(200, body)
}

fn error(status: u16, message: &str, code: i64) -> TransportResponse {
    TransportResponse::new(
        status,
        format!(r#"{{"error":"{message}","error_code":{code}}}"#),
    )
}

/// Clock whose time only moves when something sleeps on it.
pub struct VirtualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
    pub sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PollClock for VirtualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
        self.sleeps.lock().unwrap().push(duration);
    }
}
