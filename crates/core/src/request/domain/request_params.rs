use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::request::domain::image_source::{ImageInputs, ImageSource};
use crate::request::domain::operation::{field, ImageRequirement, Operation};
use crate::shared::constants::BYTES_PART_NAME;
use crate::shared::credentials::Credentials;
use crate::shared::error::FaceApiError;

/// Image payload sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart<'a> {
    pub file_name: String,
    pub data: Cow<'a, [u8]>,
}

/// A fully validated, authenticated request ready for a transport.
///
/// Text fields are form fields; when `image` is present the transport must
/// send the whole request as multipart with the image under the `img` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest<'a> {
    pub operation: Operation,
    pub url: String,
    pub fields: Vec<(&'static str, String)>,
    pub image: Option<ImagePart<'a>>,
}

impl EncodedRequest<'_> {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_multipart(&self) -> bool {
        self.image.is_some()
    }
}

/// Parameter bag for a single remote operation.
///
/// Setters accept any subset of fields; [`RequestParams::encode`] checks
/// the bag against the operation before anything is read or sent.
#[derive(Debug, Clone, Default)]
pub struct RequestParams<'a> {
    fields: Vec<(&'static str, String)>,
    images: Vec<ImageSource<'a>>,
}

impl<'a> RequestParams<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group_name(self, name: &str) -> Self {
        self.set(field::GROUP_NAME, name)
    }

    pub fn person_id(self, id: &str) -> Self {
        self.set(field::PERSON_ID, id)
    }

    pub fn person_name(self, name: &str) -> Self {
        self.set(field::PERSON_NAME, name)
    }

    pub fn face_id(self, id: &str) -> Self {
        self.set(field::FACE_ID, id)
    }

    pub fn session_id(self, id: &str) -> Self {
        self.set(field::SESSION_ID, id)
    }

    pub fn image(mut self, source: ImageSource<'a>) -> Self {
        self.images.push(source);
        self
    }

    /// Adds every source set in `inputs`; exclusivity is checked at encode time.
    pub fn images(mut self, inputs: ImageInputs<'a>) -> Self {
        if let Some(url) = inputs.url {
            self.images.push(ImageSource::Url(url));
        }
        if let Some(path) = inputs.file {
            self.images.push(ImageSource::File(path));
        }
        if let Some(data) = inputs.bytes {
            self.images.push(ImageSource::Bytes(data));
        }
        self
    }

    fn set(mut self, name: &'static str, value: &str) -> Self {
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.fields.push((name, value.to_string())),
        }
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Validates against `operation`, prepends credentials and resolves the
    /// image source. File sources are read only after validation passes.
    pub(crate) fn encode(
        self,
        operation: Operation,
        url: String,
        credentials: &Credentials,
    ) -> Result<EncodedRequest<'a>, FaceApiError> {
        self.validate(operation)?;

        let mut fields = Vec::with_capacity(self.fields.len() + 3);
        fields.push((field::API_KEY, credentials.key().to_string()));
        fields.push((field::API_SECRET, credentials.secret().to_string()));
        fields.extend(self.fields);

        let image = match self.images.first() {
            None => None,
            Some(ImageSource::Url(image_url)) => {
                fields.push((field::URL, image_url.to_string()));
                None
            }
            Some(ImageSource::File(path)) => Some(read_image_file(path)?),
            Some(ImageSource::Bytes(data)) => Some(ImagePart {
                file_name: BYTES_PART_NAME.to_string(),
                data: Cow::Borrowed(*data),
            }),
        };

        Ok(EncodedRequest {
            operation,
            url,
            fields,
            image,
        })
    }

    fn validate(&self, operation: Operation) -> Result<(), FaceApiError> {
        match (operation.image_requirement(), self.images.len()) {
            (ImageRequirement::None, 0) | (ImageRequirement::ExactlyOne, 1) => {}
            (ImageRequirement::None, n) => {
                return Err(FaceApiError::usage(format!(
                    "{operation} takes no image, got {n}"
                )));
            }
            (ImageRequirement::ExactlyOne, n) => {
                return Err(FaceApiError::usage(format!(
                    "{operation} requires exactly one image source, got {n}"
                )));
            }
        }

        for name in operation.required_fields() {
            match self.get(name) {
                Some(value) if !value.trim().is_empty() => {}
                _ => {
                    return Err(FaceApiError::usage(format!(
                        "{operation} requires a non-empty {name}"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn read_image_file(path: &Path) -> Result<ImagePart<'static>, FaceApiError> {
    let data = fs::read(path).map_err(|e| FaceApiError::ImageFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| BYTES_PART_NAME.to_string());
    Ok(ImagePart {
        file_name,
        data: Cow::Owned(data),
    })
}
