use {
    super::{
        entities,
        repository::Repository,
    },
    crate::{
        api::RestError,
        kernel::entities::ListingId,
        listing,
    },
    std::sync::Arc,
};

pub struct Service {
    repo:    Arc<Repository>,
    listing: Arc<listing::service::Service>,
}

impl Service {
    pub fn new(listing: Arc<listing::service::Service>) -> Self {
        Self {
            repo: Arc::new(Repository::new()),
            listing,
        }
    }

    /// The bid ledger protocol: resolve the listing, increment its bid
    /// counter, and only then record the bid. The counter update must
    /// succeed before the bid is durably recorded; a listing that vanished
    /// in between yields the conflict sentinel and no bid.
    #[tracing::instrument(skip_all, fields(product_id = %bid_create.product_id))]
    pub async fn handle_bid(
        &self,
        bid_create: entities::BidCreate,
    ) -> Result<entities::BidOutcome, RestError> {
        self.listing
            .get_listing(bid_create.product_id)
            .await
            .ok_or(RestError::ListingNotFound)?;

        match self.listing.increment_total_bids(bid_create.product_id).await {
            Some(_) => Ok(entities::BidOutcome::Placed(
                self.repo.add_bid(bid_create).await,
            )),
            None => {
                tracing::warn!(
                    product_id = %bid_create.product_id,
                    "Bid counter update matched no listing, bid not recorded"
                );
                Ok(entities::BidOutcome::CounterConflict)
            }
        }
    }

    pub async fn get_bids_for_product(&self, product_id: ListingId) -> Vec<entities::Bid> {
        self.repo.get_bids_by_product(product_id).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::kernel::entities::parse_email,
        futures::future::join_all,
        uuid::Uuid,
    };

    fn test_listing_create() -> listing::entities::ListingCreate {
        listing::entities::ListingCreate {
            seller_email:               parse_email("seller@example.com").unwrap(),
            seller_id:                  Uuid::new_v4(),
            seller_name:                None,
            car_name:                   Some("test car".to_string()),
            car_brand:                  Some("toyota".to_string()),
            car_type:                   None,
            price:                      Some(9000),
            car_condition:              Some("used".to_string()),
            purchasing_date:            None,
            description:                None,
            photo:                      None,
            approval_status:            None,
            adding_date:                None,
            manufacture_year:           None,
            engine_capacity:            None,
            total_run:                  None,
            fuel_type:                  None,
            transmission_type:          None,
            registered_year:            None,
            seller_phone:               None,
            sell_status:                None,
            seller_verification_status: None,
        }
    }

    fn bid_create(product_id: ListingId, amount: i64) -> entities::BidCreate {
        entities::BidCreate {
            product_id,
            bidder_email: parse_email("buyer@example.com").unwrap(),
            bidder_name: Some("Test Buyer".to_string()),
            bid_amount: amount,
        }
    }

    #[tokio::test]
    async fn test_successful_bid_increments_counter_and_records_bid() {
        let listing_service = Arc::new(listing::service::Service::new());
        let service = Service::new(listing_service.clone());
        let listing = listing_service.add_listing(test_listing_create()).await;
        assert_eq!(listing.total_bids, 0);

        let outcome = service.handle_bid(bid_create(listing.id, 9100)).await.unwrap();
        let bid = match outcome {
            entities::BidOutcome::Placed(bid) => bid,
            entities::BidOutcome::CounterConflict => panic!("bid unexpectedly rejected"),
        };
        assert_eq!(bid.product_id, listing.id);
        assert_eq!(bid.bid_amount, 9100);

        let stored = listing_service.get_listing(listing.id).await.unwrap();
        assert_eq!(stored.total_bids, 1);
        assert_eq!(service.get_bids_for_product(listing.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_bid_on_unknown_listing_records_nothing() {
        let listing_service = Arc::new(listing::service::Service::new());
        let service = Service::new(listing_service);

        let err = service
            .handle_bid(bid_create(Uuid::new_v4(), 9100))
            .await
            .unwrap_err();
        assert_eq!(err, RestError::ListingNotFound);
        assert_eq!(service.repo.bid_count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_bids_are_all_counted() {
        let listing_service = Arc::new(listing::service::Service::new());
        let service = Arc::new(Service::new(listing_service.clone()));
        let listing = listing_service.add_listing(test_listing_create()).await;

        let bids = (0..32).map(|i| {
            let service = service.clone();
            let product_id = listing.id;
            tokio::spawn(async move {
                service.handle_bid(bid_create(product_id, 9000 + i)).await
            })
        });
        for result in join_all(bids).await {
            assert!(matches!(
                result.unwrap().unwrap(),
                entities::BidOutcome::Placed(_)
            ));
        }

        let stored = listing_service.get_listing(listing.id).await.unwrap();
        assert_eq!(stored.total_bids, 32);
        assert_eq!(service.get_bids_for_product(listing.id).await.len(), 32);
    }

    #[tokio::test]
    async fn test_bids_for_other_listings_are_not_returned() {
        let listing_service = Arc::new(listing::service::Service::new());
        let service = Service::new(listing_service.clone());
        let first = listing_service.add_listing(test_listing_create()).await;
        let second = listing_service.add_listing(test_listing_create()).await;

        service.handle_bid(bid_create(first.id, 9100)).await.unwrap();
        service.handle_bid(bid_create(second.id, 9200)).await.unwrap();
        service.handle_bid(bid_create(second.id, 9300)).await.unwrap();

        assert_eq!(service.get_bids_for_product(first.id).await.len(), 1);
        assert_eq!(service.get_bids_for_product(second.id).await.len(), 2);
    }
}
