use serde::{Deserialize, Serialize};

use super::resolution_error::DidResolutionError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct DidResolutionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<DidResolutionError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl DidResolutionMetadata {
    pub fn builder() -> DidResolutionMetadataBuilder {
        DidResolutionMetadataBuilder::default()
    }

    pub fn content_type(&self) -> Option<&String> {
        self.content_type.as_ref()
    }

    pub fn error(&self) -> Option<&DidResolutionError> {
        self.error.as_ref()
    }

    pub fn message(&self) -> Option<&String> {
        self.message.as_ref()
    }
}

#[derive(Default)]
pub struct DidResolutionMetadataBuilder {
    content_type: Option<String>,
    error: Option<DidResolutionError>,
    message: Option<String>,
}

impl DidResolutionMetadataBuilder {
    pub fn content_type(mut self, content_type: String) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn error(mut self, error: DidResolutionError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }

    pub fn build(self) -> DidResolutionMetadata {
        DidResolutionMetadata {
            content_type: self.content_type,
            error: self.error,
            message: self.message,
        }
    }
}
