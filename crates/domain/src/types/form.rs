//! Multipart form bodies
//!
//! Requests that may carry files describe themselves as an ordered list of
//! text and file parts; the HTTP adapter turns that into the wire encoding.

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime_type: None, bytes }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, attachment: Attachment },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Ordered multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    pub parts: Vec<FormPart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text { name: name.to_string(), value: value.into() });
        self
    }

    /// Append a text part only when `value` is present and non-empty.
    pub fn text_opt(self, name: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    pub fn file_opt(mut self, name: &str, attachment: Option<&Attachment>) -> Self {
        if let Some(attachment) = attachment {
            self.parts
                .push(FormPart::File { name: name.to_string(), attachment: attachment.clone() });
        }
        self
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn has_files(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, FormPart::File { .. }))
    }
}

/// Implemented by request types sent as multipart form data.
pub trait ToForm {
    fn to_form(&self) -> FormPayload;
}
