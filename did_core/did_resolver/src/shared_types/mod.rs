pub mod did_document_metadata;
pub mod media_type;
