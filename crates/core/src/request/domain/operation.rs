use std::fmt;

/// Form field names accepted by the remote.
pub mod field {
    pub const API_KEY: &str = "api_key";
    pub const API_SECRET: &str = "api_secret";
    pub const URL: &str = "url";
    pub const IMG: &str = "img";
    pub const PERSON_NAME: &str = "person_name";
    pub const PERSON_ID: &str = "person_id";
    pub const FACE_ID: &str = "face_id";
    pub const GROUP_NAME: &str = "group_name";
    pub const SESSION_ID: &str = "session_id";
}

/// Whether an operation takes an image, and if so that exactly one is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRequirement {
    None,
    ExactlyOne,
}

/// One remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    DetectionDetect,
    PersonCreate,
    PersonDelete,
    PersonAddFace,
    PersonRemoveFace,
    GroupCreate,
    GroupDelete,
    GroupAddPerson,
    GroupRemovePerson,
    TrainIdentify,
    InfoGetSession,
    RecognitionIdentify,
}

impl Operation {
    pub const ALL: &[Operation] = &[
        Operation::DetectionDetect,
        Operation::PersonCreate,
        Operation::PersonDelete,
        Operation::PersonAddFace,
        Operation::PersonRemoveFace,
        Operation::GroupCreate,
        Operation::GroupDelete,
        Operation::GroupAddPerson,
        Operation::GroupRemovePerson,
        Operation::TrainIdentify,
        Operation::InfoGetSession,
        Operation::RecognitionIdentify,
    ];

    /// Path relative to the versioned base URL.
    pub fn path(self) -> &'static str {
        match self {
            Operation::DetectionDetect => "detection/detect",
            Operation::PersonCreate => "person/create",
            Operation::PersonDelete => "person/delete",
            Operation::PersonAddFace => "person/add_face",
            Operation::PersonRemoveFace => "person/remove_face",
            Operation::GroupCreate => "group/create",
            Operation::GroupDelete => "group/delete",
            Operation::GroupAddPerson => "group/add_person",
            Operation::GroupRemovePerson => "group/remove_person",
            Operation::TrainIdentify => "train/identify",
            Operation::InfoGetSession => "info/get_session",
            Operation::RecognitionIdentify => "recognition/identify",
        }
    }

    pub fn required_fields(self) -> &'static [&'static str] {
        use field::*;
        match self {
            Operation::DetectionDetect => &[],
            Operation::PersonCreate => &[PERSON_NAME],
            Operation::PersonDelete => &[PERSON_ID],
            Operation::PersonAddFace | Operation::PersonRemoveFace => &[PERSON_ID, FACE_ID],
            Operation::GroupCreate | Operation::GroupDelete => &[GROUP_NAME],
            Operation::GroupAddPerson | Operation::GroupRemovePerson => &[GROUP_NAME, PERSON_ID],
            Operation::TrainIdentify => &[GROUP_NAME],
            Operation::InfoGetSession => &[SESSION_ID],
            Operation::RecognitionIdentify => &[GROUP_NAME],
        }
    }

    pub fn image_requirement(self) -> ImageRequirement {
        match self {
            Operation::DetectionDetect | Operation::RecognitionIdentify => {
                ImageRequirement::ExactlyOne
            }
            _ => ImageRequirement::None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
