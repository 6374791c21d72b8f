use crate::client::builder::FaceApiClientBuilder;
use crate::recognition::domain::acknowledgement::Acknowledgement;
use crate::recognition::domain::detected_face::DetectedFace;
use crate::recognition::domain::identify_result::IdentifyResult;
use crate::recognition::infrastructure::response_parser::{
    parse_ack, parse_detect, parse_first_face_id, parse_identify, parse_person_create,
    parse_removal,
};
use crate::request::domain::image_source::ImageInputs;
use crate::request::domain::operation::Operation;
use crate::request::domain::request_params::RequestParams;
use crate::shared::api_context::ApiContext;
use crate::shared::error::FaceApiError;
use crate::training::domain::train_session::{SessionInfo, TrainOutcome};
use crate::training::train_coordinator::TrainCoordinator;
use crate::transport::dispatcher::Dispatcher;
use crate::transport::domain::transport::TransportResponse;

/// Blocking facade over the remote face recognition workflow.
///
/// Legal ordering, which the remote enforces:
/// create group -> create person -> add person to group -> attach faces
/// -> train group -> identify. Any membership or face change after
/// training makes identify fail with [`FaceApiError::StaleModel`] until
/// the group is trained again.
///
/// Group arguments are `Option<&str>`; `None` selects the default label
/// configured at construction. The client keeps no other state between
/// calls.
pub struct FaceApiClient {
    dispatcher: Dispatcher,
    trainer: TrainCoordinator,
    default_group: String,
}

impl FaceApiClient {
    pub fn builder(key: impl Into<String>, secret: impl Into<String>) -> FaceApiClientBuilder {
        FaceApiClientBuilder::new(key, secret)
    }

    /// Client with default region, scheme, group label and polling policy.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, FaceApiError> {
        Self::builder(key, secret).build()
    }

    pub(crate) fn from_parts(
        dispatcher: Dispatcher,
        trainer: TrainCoordinator,
        default_group: String,
    ) -> Self {
        Self {
            dispatcher,
            trainer,
            default_group,
        }
    }

    pub fn context(&self) -> &ApiContext {
        self.dispatcher.context()
    }

    pub fn default_group(&self) -> &str {
        &self.default_group
    }

    fn group<'g>(&'g self, group: Option<&'g str>) -> &'g str {
        group.unwrap_or(&self.default_group)
    }

    /// Every face found in the image, in the remote's order. Fails with a
    /// shape error if any face lacks an id.
    pub fn detect_faces<'a>(
        &self,
        image: impl Into<ImageInputs<'a>>,
    ) -> Result<Vec<DetectedFace>, FaceApiError> {
        let response = self.send_detect(image)?;
        parse_detect(&response)
    }

    /// Id of the first face found in the image. Only that face has to be
    /// well formed.
    pub fn detect_face<'a>(&self, image: impl Into<ImageInputs<'a>>) -> Result<String, FaceApiError> {
        let response = self.send_detect(image)?;
        parse_first_face_id(&response)?.ok_or(FaceApiError::NoFaceDetected)
    }

    fn send_detect<'a>(
        &self,
        image: impl Into<ImageInputs<'a>>,
    ) -> Result<TransportResponse, FaceApiError> {
        let source = image.into().into_source()?;
        log::debug!("Detecting faces from {}", source.variant_name());
        self.dispatcher
            .send(Operation::DetectionDetect, RequestParams::new().image(source))
    }

    /// Registers a person and returns the id the remote minted for it.
    pub fn create_person(&self, name: &str) -> Result<String, FaceApiError> {
        let response = self
            .dispatcher
            .send(Operation::PersonCreate, RequestParams::new().person_name(name))?;
        let person_id = parse_person_create(&response)?;
        log::debug!("Created person {name} as {person_id}");
        Ok(person_id)
    }

    /// Deletes a person everywhere. The remote also drops it from every
    /// group, so no separate group removal is needed or issued.
    pub fn delete_person(&self, person_id: &str) -> Result<Acknowledgement, FaceApiError> {
        let response = self
            .dispatcher
            .send(Operation::PersonDelete, RequestParams::new().person_id(person_id))?;
        parse_removal(Operation::PersonDelete, &response)
    }

    /// Attaches a detected face to a person. A face belongs to at most one
    /// person; attaching an owned face is rejected remotely.
    pub fn attach_face(&self, person_id: &str, face_id: &str) -> Result<Acknowledgement, FaceApiError> {
        let response = self.dispatcher.send(
            Operation::PersonAddFace,
            RequestParams::new().person_id(person_id).face_id(face_id),
        )?;
        parse_ack(Operation::PersonAddFace, &response)
    }

    pub fn detach_face(&self, person_id: &str, face_id: &str) -> Result<Acknowledgement, FaceApiError> {
        let response = self.dispatcher.send(
            Operation::PersonRemoveFace,
            RequestParams::new().person_id(person_id).face_id(face_id),
        )?;
        parse_removal(Operation::PersonRemoveFace, &response)
    }

    pub fn create_group(&self, group: Option<&str>) -> Result<Acknowledgement, FaceApiError> {
        let response = self.dispatcher.send(
            Operation::GroupCreate,
            RequestParams::new().group_name(self.group(group)),
        )?;
        parse_ack(Operation::GroupCreate, &response)
    }

    pub fn delete_group(&self, group: Option<&str>) -> Result<Acknowledgement, FaceApiError> {
        let response = self.dispatcher.send(
            Operation::GroupDelete,
            RequestParams::new().group_name(self.group(group)),
        )?;
        parse_removal(Operation::GroupDelete, &response)
    }

    pub fn add_person_to_group(
        &self,
        group: Option<&str>,
        person_id: &str,
    ) -> Result<Acknowledgement, FaceApiError> {
        let response = self.dispatcher.send(
            Operation::GroupAddPerson,
            RequestParams::new()
                .group_name(self.group(group))
                .person_id(person_id),
        )?;
        parse_ack(Operation::GroupAddPerson, &response)
    }

    /// Removes a person from one group only; the person keeps existing.
    pub fn remove_person_from_group(
        &self,
        group: Option<&str>,
        person_id: &str,
    ) -> Result<Acknowledgement, FaceApiError> {
        let response = self.dispatcher.send(
            Operation::GroupRemovePerson,
            RequestParams::new()
                .group_name(self.group(group))
                .person_id(person_id),
        )?;
        parse_removal(Operation::GroupRemovePerson, &response)
    }

    /// Trains the group's identification model and blocks until the
    /// session reaches `SUCC` or `FAILED`, or the polling deadline passes.
    pub fn train_group(&self, group: Option<&str>) -> Result<TrainOutcome, FaceApiError> {
        self.trainer.train(&self.dispatcher, self.group(group))
    }

    /// A single, non-blocking look at a session.
    pub fn get_session(&self, session_id: &str) -> Result<SessionInfo, FaceApiError> {
        self.trainer.poll(&self.dispatcher, session_id)
    }

    /// Ranks the group's persons against the face in `image`. The group
    /// must have been trained since its last change.
    pub fn identify<'a>(
        &self,
        group: Option<&str>,
        image: impl Into<ImageInputs<'a>>,
    ) -> Result<IdentifyResult, FaceApiError> {
        let group = self.group(group);
        let source = image.into().into_source()?;
        log::debug!("Identifying in {group} from {}", source.variant_name());
        let response = self.dispatcher.send(
            Operation::RecognitionIdentify,
            RequestParams::new().group_name(group).image(source),
        )?;
        parse_identify(group, &response)
    }

    /// Detects a face in `image` and attaches it to the person. Nothing is
    /// attached when detection finds no face or a malformed answer.
    pub fn attach_face_from_image<'a>(
        &self,
        person_id: &str,
        image: impl Into<ImageInputs<'a>>,
    ) -> Result<String, FaceApiError> {
        require_non_empty("person_id", person_id)?;
        let face_id = self.detect_face(image)?;
        self.attach_face(person_id, &face_id)?;
        Ok(face_id)
    }

    /// [`Self::attach_face_from_image`] for each image in order, stopping
    /// at the first failure. Returns the attached face ids.
    pub fn attach_faces_from_images<'a, I, S>(
        &self,
        person_id: &str,
        images: I,
    ) -> Result<Vec<String>, FaceApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ImageInputs<'a>>,
    {
        require_non_empty("person_id", person_id)?;
        images
            .into_iter()
            .map(|image| self.attach_face_from_image(person_id, image))
            .collect()
    }

    /// Creates a person and adds it to the group in one step.
    pub fn enroll_person(&self, name: &str, group: Option<&str>) -> Result<String, FaceApiError> {
        let person_id = self.create_person(name)?;
        self.add_person_to_group(group, &person_id)?;
        Ok(person_id)
    }
}

fn require_non_empty(name: &str, value: &str) -> Result<(), FaceApiError> {
    if value.trim().is_empty() {
        return Err(FaceApiError::usage(format!("{name} must not be empty")));
    }
    Ok(())
}
