use {
    super::{
        entities,
        repository::Repository,
    },
    crate::{
        api::RestError,
        kernel::entities::{
            ListingId,
            UserId,
        },
    },
    std::sync::Arc,
};

/// Home page slices show the first eight listings of their ordering.
pub const HOME_SLICE_LEN: usize = 8;

pub struct Service {
    repo: Arc<Repository>,
}

impl Service {
    pub fn new() -> Self {
        Self {
            repo: Arc::new(Repository::new()),
        }
    }

    pub async fn add_listing(&self, create: entities::ListingCreate) -> entities::Listing {
        self.repo.add_listing(create).await
    }

    pub async fn get_listing(&self, id: ListingId) -> Option<entities::Listing> {
        self.repo.get_listing(id).await
    }

    pub async fn get_all_listings(&self) -> Vec<entities::Listing> {
        self.repo.get_listings().await
    }

    pub async fn get_seller_listings(&self, seller_email: &str) -> Vec<entities::Listing> {
        self.repo.get_listings_by_seller(seller_email).await
    }

    /// Filter, then paginate over the full result: `total_pages` always
    /// reflects the complete filtered set regardless of the requested page,
    /// and out-of-range pages yield an empty slice.
    #[tracing::instrument(skip_all, fields(page = query.page, per_page = query.per_page))]
    pub async fn query_listings(
        &self,
        query: entities::ListingQuery,
    ) -> Result<entities::ListingPage, RestError> {
        if query.per_page == 0 || query.page == 0 {
            return Err(RestError::BadParameters(
                "Page numbering starts at 1 and pages cannot be empty".to_string(),
            ));
        }
        let matched = self.repo.get_filtered_listings(&query.filter).await;
        let total_pages = matched.len().div_ceil(query.per_page);
        let listings = matched
            .into_iter()
            .skip((query.page - 1) * query.per_page)
            .take(query.per_page)
            .collect();
        Ok(entities::ListingPage {
            total_pages,
            listings,
        })
    }

    /// Newest eight listings. The full set is fetched and then truncated,
    /// the same fetch-all-then-slice contract as `query_listings`.
    pub async fn get_home_listings(&self) -> Vec<entities::Listing> {
        let mut listings = self
            .repo
            .get_filtered_listings(&entities::ListingFilter::default())
            .await;
        listings.truncate(HOME_SLICE_LEN);
        listings
    }

    /// Eight most-bid listings, ties broken by recency.
    pub async fn get_top_bid_listings(&self) -> Vec<entities::Listing> {
        let mut listings = self
            .repo
            .get_filtered_listings(&entities::ListingFilter::default())
            .await;
        listings.sort_by(|a, b| {
            b.total_bids
                .cmp(&a.total_bids)
                .then(b.seq.cmp(&a.seq))
        });
        listings.truncate(HOME_SLICE_LEN);
        listings
    }

    pub async fn replace_listing(
        &self,
        id: ListingId,
        replace: entities::ListingReplace,
    ) -> Result<(), RestError> {
        if self.repo.replace_listing_fields(id, replace).await {
            Ok(())
        } else {
            Err(RestError::ListingNotFound)
        }
    }

    pub async fn update_sell_status(
        &self,
        id: ListingId,
        sell_status: String,
    ) -> Result<(), RestError> {
        if self.repo.update_sell_status(id, sell_status).await {
            Ok(())
        } else {
            Err(RestError::ListingNotFound)
        }
    }

    pub async fn update_seller_verification(&self, seller_id: UserId, status: String) -> u64 {
        self.repo
            .update_seller_verification(seller_id, status)
            .await
    }

    /// New counter value, or `None` when the listing vanished. Used by the
    /// bid ledger, which must observe a successful increment before it
    /// records a bid.
    pub async fn increment_total_bids(&self, id: ListingId) -> Option<u64> {
        self.repo.increment_total_bids(id).await
    }

    pub async fn delete_listing(&self, id: ListingId) -> u64 {
        u64::from(self.repo.delete_listing(id).await)
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::kernel::entities::parse_email,
        uuid::Uuid,
    };

    fn listing_create(brand: &str, condition: &str, price: i64) -> entities::ListingCreate {
        entities::ListingCreate {
            seller_email:               parse_email("seller@example.com").unwrap(),
            seller_id:                  Uuid::new_v4(),
            seller_name:                Some("Test Seller".to_string()),
            car_name:                   Some(format!("{} test car", brand)),
            car_brand:                  Some(brand.to_string()),
            car_type:                   Some("sedan".to_string()),
            price:                      Some(price),
            car_condition:              Some(condition.to_string()),
            purchasing_date:            None,
            description:                None,
            photo:                      None,
            approval_status:            Some("approved".to_string()),
            adding_date:                None,
            manufacture_year:           None,
            engine_capacity:            None,
            total_run:                  None,
            fuel_type:                  None,
            transmission_type:          None,
            registered_year:            None,
            seller_phone:               None,
            sell_status:                Some("available".to_string()),
            seller_verification_status: None,
        }
    }

    fn query(brand: &str, condition: &str, price: &str, per_page: usize, page: usize) -> entities::ListingQuery {
        entities::ListingQuery {
            per_page,
            page,
            filter: entities::ListingFilter {
                condition: entities::ListingFilter::clause(condition),
                brand:     entities::ListingFilter::clause(brand),
                price:     entities::PriceRange::parse(price).unwrap(),
            },
        }
    }

    #[tokio::test]
    async fn test_open_ended_bucket_applies_lower_bound_only() {
        let service = Service::new();
        service.add_listing(listing_create("toyota", "used", 7000)).await;
        let expensive = service
            .add_listing(listing_create("honda", "new", 15000))
            .await;

        let page = service
            .query_listings(query("all", "all", "8000-9000", 10, 1))
            .await
            .unwrap();
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.listings.len(), 1);
        assert_eq!(page.listings[0].id, expensive.id);

        // Well above the nominal upper bound, still matched.
        let flagship = service
            .add_listing(listing_create("porsche", "new", 50000))
            .await;
        let page = service
            .query_listings(query("all", "all", "8000-9000", 10, 1))
            .await
            .unwrap();
        assert_eq!(
            page.listings.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![flagship.id, expensive.id]
        );
    }

    #[tokio::test]
    async fn test_bounded_range_applies_both_bounds() {
        let service = Service::new();
        service.add_listing(listing_create("toyota", "used", 9000)).await;
        let inside = service
            .add_listing(listing_create("honda", "used", 12000))
            .await;
        service.add_listing(listing_create("bmw", "used", 20000)).await;

        let page = service
            .query_listings(query("all", "all", "10000-15000", 10, 1))
            .await
            .unwrap();
        assert_eq!(page.listings.len(), 1);
        assert_eq!(page.listings[0].id, inside.id);
    }

    #[tokio::test]
    async fn test_all_sentinels_impose_no_restriction() {
        let service = Service::new();
        for i in 0..5 {
            service
                .add_listing(listing_create("toyota", "used", 5000 + i))
                .await;
        }
        let page = service
            .query_listings(query("all", "all", "all", 10, 1))
            .await
            .unwrap();
        assert_eq!(page.listings.len(), 5);
    }

    #[tokio::test]
    async fn test_brand_and_condition_match_case_insensitive_substring() {
        let service = Service::new();
        let toyota = service
            .add_listing(listing_create("Toyota", "Used", 9000))
            .await;
        service.add_listing(listing_create("honda", "new", 9000)).await;

        let page = service
            .query_listings(query("toy", "USED", "all", 10, 1))
            .await
            .unwrap();
        assert_eq!(page.listings.len(), 1);
        assert_eq!(page.listings[0].id, toyota.id);
    }

    #[tokio::test]
    async fn test_pagination_counts_full_filtered_set() {
        let service = Service::new();
        for i in 0..7 {
            service
                .add_listing(listing_create("toyota", "used", 10000 + i))
                .await;
        }

        let page = service
            .query_listings(query("all", "all", "all", 3, 1))
            .await
            .unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.listings.len(), 3);

        let last = service
            .query_listings(query("all", "all", "all", 3, 3))
            .await
            .unwrap();
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.listings.len(), 1);

        // Out-of-range pages are empty but total_pages is unchanged.
        let beyond = service
            .query_listings(query("all", "all", "all", 3, 9))
            .await
            .unwrap();
        assert_eq!(beyond.total_pages, 3);
        assert!(beyond.listings.is_empty());
    }

    #[tokio::test]
    async fn test_query_results_are_newest_first() {
        let service = Service::new();
        let older = service
            .add_listing(listing_create("toyota", "used", 9000))
            .await;
        let newer = service
            .add_listing(listing_create("toyota", "used", 9500))
            .await;

        let page = service
            .query_listings(query("all", "all", "all", 10, 1))
            .await
            .unwrap();
        assert_eq!(
            page.listings.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );
    }

    #[tokio::test]
    async fn test_query_rejects_zero_page_parameters() {
        let service = Service::new();
        assert!(matches!(
            service
                .query_listings(query("all", "all", "all", 0, 1))
                .await
                .unwrap_err(),
            RestError::BadParameters(_)
        ));
        assert!(matches!(
            service
                .query_listings(query("all", "all", "all", 10, 0))
                .await
                .unwrap_err(),
            RestError::BadParameters(_)
        ));
    }

    #[tokio::test]
    async fn test_home_listings_newest_eight() {
        let service = Service::new();
        let mut ids = Vec::new();
        for i in 0..10 {
            ids.push(
                service
                    .add_listing(listing_create("toyota", "used", 5000 + i))
                    .await
                    .id,
            );
        }
        let home = service.get_home_listings().await;
        assert_eq!(home.len(), HOME_SLICE_LEN);
        assert_eq!(home[0].id, ids[9]);
        assert_eq!(home[7].id, ids[2]);
    }

    #[tokio::test]
    async fn test_top_bid_listings_order() {
        let service = Service::new();
        let quiet = service
            .add_listing(listing_create("toyota", "used", 9000))
            .await;
        let popular = service
            .add_listing(listing_create("honda", "used", 9000))
            .await;
        for _ in 0..3 {
            service.increment_total_bids(popular.id).await.unwrap();
        }

        let top = service.get_top_bid_listings().await;
        assert_eq!(top[0].id, popular.id);
        assert_eq!(top[1].id, quiet.id);
    }

    #[tokio::test]
    async fn test_replace_listing_overwrites_omitted_fields() {
        let service = Service::new();
        let listing = service
            .add_listing(listing_create("toyota", "used", 9000))
            .await;
        service.increment_total_bids(listing.id).await.unwrap();

        service
            .replace_listing(
                listing.id,
                entities::ListingReplace {
                    car_name: Some("renamed".to_string()),
                    price: Some(9500),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = service.get_listing(listing.id).await.unwrap();
        assert_eq!(updated.car_name.as_deref(), Some("renamed"));
        assert_eq!(updated.price, Some(9500));
        // Omitted descriptive fields are destructively cleared.
        assert_eq!(updated.car_brand, None);
        assert_eq!(updated.car_condition, None);
        // Ownership, status and counter fields survive.
        assert_eq!(updated.seller_email.as_str(), "seller@example.com");
        assert_eq!(updated.sell_status.as_deref(), Some("available"));
        assert_eq!(updated.total_bids, 1);
    }

    #[tokio::test]
    async fn test_replace_listing_unknown_id() {
        let service = Service::new();
        assert_eq!(
            service
                .replace_listing(Uuid::new_v4(), Default::default())
                .await
                .unwrap_err(),
            RestError::ListingNotFound
        );
    }

    #[tokio::test]
    async fn test_update_seller_verification_touches_every_listing() {
        let service = Service::new();
        let seller_id = Uuid::new_v4();
        for _ in 0..3 {
            let mut create = listing_create("toyota", "used", 9000);
            create.seller_id = seller_id;
            service.add_listing(create).await;
        }
        service.add_listing(listing_create("honda", "new", 9000)).await;

        let modified = service
            .update_seller_verification(seller_id, "verified".to_string())
            .await;
        assert_eq!(modified, 3);

        for listing in service.get_all_listings().await {
            if listing.seller_id == seller_id {
                assert_eq!(
                    listing.seller_verification_status.as_deref(),
                    Some("verified")
                );
            } else {
                assert_eq!(listing.seller_verification_status, None);
            }
        }
    }

    #[tokio::test]
    async fn test_delete_listing_counts() {
        let service = Service::new();
        let listing = service
            .add_listing(listing_create("toyota", "used", 9000))
            .await;
        assert_eq!(service.delete_listing(listing.id).await, 1);
        assert_eq!(service.delete_listing(listing.id).await, 0);
        assert!(service.get_listing(listing.id).await.is_none());
    }
}
