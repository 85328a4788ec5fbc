use {
    crate::kernel::entities::{
        BidId,
        ListingId,
    },
    email_address::EmailAddress,
    time::OffsetDateTime,
};

/// Immutable once created; never updated or deleted by the ledger.
#[derive(Clone, Debug)]
pub struct Bid {
    pub id:            BidId,
    pub product_id:    ListingId,
    pub bidder_email:  EmailAddress,
    pub bidder_name:   Option<String>,
    pub bid_amount:    i64,
    pub creation_time: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct BidCreate {
    pub product_id:   ListingId,
    pub bidder_email: EmailAddress,
    pub bidder_name:  Option<String>,
    pub bid_amount:   i64,
}

/// A failed counter update is a routine outcome of concurrent bidding, not
/// an error: the bid is not recorded and the caller is told so.
#[derive(Clone, Debug)]
pub enum BidOutcome {
    Placed(Bid),
    CounterConflict,
}
