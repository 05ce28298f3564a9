use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailchimpError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mailchimp API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode Mailchimp response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MailchimpError {
    /// HTTP status returned by the API, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            MailchimpError::Api { status, .. } => Some(*status),
            MailchimpError::Http(e) => e.status().map(|s| s.as_u16()),
            MailchimpError::Decode(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MailchimpError>;
