use std::path::Path;

use crate::shared::error::FaceApiError;

/// Where the remote should take the image from. Borrowed for one call only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// The remote fetches the image itself.
    Url(&'a str),
    /// Read synchronously and sent as a multipart part.
    File(&'a Path),
    /// Sent as a multipart part as-is.
    Bytes(&'a [u8]),
}

impl<'a> ImageSource<'a> {
    pub fn variant_name(&self) -> &'static str {
        match self {
            ImageSource::Url(_) => "url",
            ImageSource::File(_) => "file",
            ImageSource::Bytes(_) => "bytes",
        }
    }
}

/// Loose image arguments as a caller might collect them, e.g. from optional
/// form inputs. Exactly one must be set for a call to proceed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageInputs<'a> {
    pub url: Option<&'a str>,
    pub file: Option<&'a Path>,
    pub bytes: Option<&'a [u8]>,
}

impl<'a> ImageInputs<'a> {
    pub fn url(mut self, url: &'a str) -> Self {
        self.url = Some(url);
        self
    }

    pub fn file(mut self, path: &'a Path) -> Self {
        self.file = Some(path);
        self
    }

    pub fn bytes(mut self, data: &'a [u8]) -> Self {
        self.bytes = Some(data);
        self
    }

    pub fn count(&self) -> usize {
        self.url.is_some() as usize + self.file.is_some() as usize + self.bytes.is_some() as usize
    }

    /// Collapses to the single supplied source, or fails with a usage error.
    pub fn into_source(self) -> Result<ImageSource<'a>, FaceApiError> {
        match (self.url, self.file, self.bytes) {
            (Some(url), None, None) => Ok(ImageSource::Url(url)),
            (None, Some(path), None) => Ok(ImageSource::File(path)),
            (None, None, Some(data)) => Ok(ImageSource::Bytes(data)),
            _ => Err(FaceApiError::usage(format!(
                "exactly one image source is required, got {}",
                self.count()
            ))),
        }
    }
}

impl<'a> From<ImageSource<'a>> for ImageInputs<'a> {
    fn from(source: ImageSource<'a>) -> Self {
        let inputs = ImageInputs::default();
        match source {
            ImageSource::Url(url) => inputs.url(url),
            ImageSource::File(path) => inputs.file(path),
            ImageSource::Bytes(data) => inputs.bytes(data),
        }
    }
}
