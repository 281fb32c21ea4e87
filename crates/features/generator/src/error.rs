use std::borrow::Cow;

/// Error types raised while turning a request into a QR image.
#[qrgen_derive::qrgen_error]
pub enum GeneratorError {
    /// The link was missing, empty or whitespace-only.
    #[status(400)]
    #[error("Please provide a link or text")]
    EmptyLink { context: Option<Cow<'static, str>> },

    /// The body was not a JSON object, or a field had the wrong type.
    #[error("Invalid request body{}: {message}", format_context(.context))]
    Payload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed JSON{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The data does not fit any QR version at the chosen correction level.
    #[error("QR encoding error{}: {source}", format_context(.context))]
    Encode { source: qrcode::types::QrError, context: Option<Cow<'static, str>> },

    #[error("Invalid color{}: {message}", format_context(.context))]
    Color { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("PNG encoding error{}: {source}", format_context(.context))]
    Image { source: image::ImageError, context: Option<Cow<'static, str>> },

    #[error("Archive error{}: {source}", format_context(.context))]
    Archive { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal generator error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl GeneratorError {
    /// Message exposed to clients: the underlying failure without the diagnostic context.
    #[must_use]
    pub fn public_message(&self) -> Cow<'_, str> {
        match self {
            Self::EmptyLink { .. } => Cow::Borrowed("Please provide a link or text"),
            Self::Payload { message, .. }
            | Self::Color { message, .. }
            | Self::Internal { message, .. } => Cow::Borrowed(message.as_ref()),
            Self::Json { source, .. } => Cow::Owned(source.to_string()),
            Self::Encode { source, .. } => Cow::Owned(source.to_string()),
            Self::Image { source, .. } => Cow::Owned(source.to_string()),
            Self::Archive { source, .. } => Cow::Owned(source.to_string()),
        }
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for GeneratorError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status >= 500 {
            tracing::error!(status, error = %self, "QR generation failed");
        } else {
            tracing::debug!(status, error = %self, "QR request rejected");
        }
        qrgen_kernel::server::ErrorBody::new(self.public_message()).into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_link_maps_to_bad_request() {
        let err = GeneratorError::EmptyLink { context: None };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Please provide a link or text");
    }

    #[test]
    fn public_message_drops_context() {
        let err: Result<(), GeneratorError> =
            Err(GeneratorError::Color { message: "unknown color specifier: 'x'".into(), context: None });
        let err = err.context("fillColor").unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Invalid color (fillColor): unknown color specifier: 'x'");
        assert_eq!(err.public_message(), "unknown color specifier: 'x'");
    }

    #[test]
    fn io_failures_become_archive_errors() {
        let err = GeneratorError::from(std::io::Error::other("disk full"));
        assert!(matches!(err, GeneratorError::Archive { .. }));
        assert_eq!(err.public_message(), "disk full");
    }
}
