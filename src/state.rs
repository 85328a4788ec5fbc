use {
    crate::{
        bid,
        feedback,
        kernel::auth::TokenIssuer,
        listing,
        saved_ad,
        user,
    },
    std::sync::Arc,
};

/// Process-wide service registry. Constructed exactly once at startup,
/// before the listener accepts connections, and shared behind `Arc` for the
/// lifetime of the process.
pub struct StoreNew {
    pub listing:      Arc<listing::service::Service>,
    pub bid:          Arc<bid::service::Service>,
    pub user:         Arc<user::service::Service>,
    pub saved_ad:     Arc<saved_ad::Service>,
    pub feedback:     Arc<feedback::Service>,
    pub token_issuer: TokenIssuer,
}

impl StoreNew {
    pub fn new(token_issuer: TokenIssuer) -> Self {
        let listing = Arc::new(listing::service::Service::new());
        Self {
            bid: Arc::new(bid::service::Service::new(listing.clone())),
            listing,
            user: Arc::new(user::service::Service::new()),
            saved_ad: Arc::new(saved_ad::Service::new()),
            feedback: Arc::new(feedback::Service::new()),
            token_issuer,
        }
    }
}
