use {
    super::entities,
    crate::kernel::entities::ListingId,
    time::OffsetDateTime,
    tokio::sync::RwLock,
    uuid::Uuid,
};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    bids: RwLock<Vec<entities::Bid>>,
}

#[derive(Debug, Default)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_bid(&self, create: entities::BidCreate) -> entities::Bid {
        let bid = entities::Bid {
            id:            Uuid::new_v4(),
            product_id:    create.product_id,
            bidder_email:  create.bidder_email,
            bidder_name:   create.bidder_name,
            bid_amount:    create.bid_amount,
            creation_time: OffsetDateTime::now_utc(),
        };
        self.in_memory_store.bids.write().await.push(bid.clone());
        bid
    }

    /// All bids referencing the listing, in insertion order; no sort is
    /// implied by the contract.
    pub async fn get_bids_by_product(&self, product_id: ListingId) -> Vec<entities::Bid> {
        self.in_memory_store
            .bids
            .read()
            .await
            .iter()
            .filter(|bid| bid.product_id == product_id)
            .cloned()
            .collect()
    }

    #[cfg(test)]
    pub async fn bid_count(&self) -> usize {
        self.in_memory_store.bids.read().await.len()
    }
}
