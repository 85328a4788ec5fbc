use {
    crate::api::RestError,
    email_address::EmailAddress,
    uuid::Uuid,
};

pub type UserId = Uuid;
pub type ListingId = Uuid;
pub type BidId = Uuid;
pub type SavedAdId = Uuid;
pub type FeedbackId = Uuid;

/// Sentinel query value that disables a filter clause entirely.
pub const ALL_FILTER: &str = "all";

pub fn parse_email(raw: &str) -> Result<EmailAddress, RestError> {
    raw.parse()
        .map_err(|_| RestError::BadParameters("Invalid email".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email() {
        assert!(parse_email("seller@example.com").is_ok());
        assert!(parse_email("not-an-email").is_err());
    }
}
