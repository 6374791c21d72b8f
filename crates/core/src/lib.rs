//! Blocking client for the Face++ v2 recognition service: face detection,
//! person/group bookkeeping, training and identification.

pub mod shared {
    pub mod api_context;
    pub mod cancellation;
    pub mod constants;
    pub mod credentials;
    pub mod error;
}

pub mod request {
    pub mod domain {
        pub mod image_source;
        pub mod operation;
        pub mod request_params;
    }
}

pub mod transport {
    pub mod dispatcher;
    pub mod domain {
        pub mod transport;
    }
    pub mod infrastructure {
        pub mod reqwest_transport;
    }
}

pub mod recognition {
    pub mod domain {
        pub mod acknowledgement;
        pub mod detected_face;
        pub mod identify_result;
    }
    pub mod infrastructure {
        pub mod response_parser;
    }
}

pub mod training {
    pub mod domain {
        pub mod poll_clock;
        pub mod poll_policy;
        pub mod train_session;
    }
    pub mod infrastructure {
        pub mod system_clock;
    }
    pub mod train_coordinator;
}

pub mod client {
    pub mod builder;
    pub mod face_api_client;
}

#[cfg(test)]
mod testing;

pub use client::builder::FaceApiClientBuilder;
pub use client::face_api_client::FaceApiClient;
pub use request::domain::image_source::{ImageInputs, ImageSource};
pub use shared::cancellation::CancelToken;
pub use shared::credentials::{Region, Scheme};
pub use shared::error::{FaceApiError, RemoteErrorKind};
