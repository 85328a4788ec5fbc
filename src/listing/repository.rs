use {
    super::entities,
    crate::kernel::entities::{
        ListingId,
        UserId,
    },
    std::{
        collections::HashMap,
        sync::atomic::{
            AtomicU64,
            Ordering,
        },
    },
    time::OffsetDateTime,
    tokio::sync::RwLock,
    uuid::Uuid,
};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    listings: RwLock<HashMap<ListingId, entities::Listing>>,
    next_seq: AtomicU64,
}

#[derive(Debug, Default)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_listing(&self, create: entities::ListingCreate) -> entities::Listing {
        let listing = entities::Listing {
            id:                         Uuid::new_v4(),
            seq:                        self.in_memory_store.next_seq.fetch_add(1, Ordering::SeqCst),
            seller_email:               create.seller_email,
            seller_id:                  create.seller_id,
            seller_name:                create.seller_name,
            car_name:                   create.car_name,
            car_brand:                  create.car_brand,
            car_type:                   create.car_type,
            price:                      create.price,
            car_condition:              create.car_condition,
            purchasing_date:            create.purchasing_date,
            description:                create.description,
            photo:                      create.photo,
            approval_status:            create.approval_status,
            adding_date:                create.adding_date,
            manufacture_year:           create.manufacture_year,
            engine_capacity:            create.engine_capacity,
            total_run:                  create.total_run,
            fuel_type:                  create.fuel_type,
            transmission_type:          create.transmission_type,
            registered_year:            create.registered_year,
            seller_phone:               create.seller_phone,
            sell_status:                create.sell_status,
            seller_verification_status: create.seller_verification_status,
            total_bids:                 0,
            creation_time:              OffsetDateTime::now_utc(),
        };
        self.in_memory_store
            .listings
            .write()
            .await
            .insert(listing.id, listing.clone());
        listing
    }

    pub async fn get_listing(&self, id: ListingId) -> Option<entities::Listing> {
        self.in_memory_store.listings.read().await.get(&id).cloned()
    }

    /// Every listing in insertion order, oldest first.
    pub async fn get_listings(&self) -> Vec<entities::Listing> {
        let listings = self.in_memory_store.listings.read().await;
        let mut result: Vec<entities::Listing> = listings.values().cloned().collect();
        result.sort_by_key(|listing| listing.seq);
        result
    }

    /// The complete filtered set sorted by descending recency. Pagination is
    /// applied by the caller over this full result, never pushed down here.
    pub async fn get_filtered_listings(
        &self,
        filter: &entities::ListingFilter,
    ) -> Vec<entities::Listing> {
        let listings = self.in_memory_store.listings.read().await;
        let mut result: Vec<entities::Listing> = listings
            .values()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.seq.cmp(&a.seq));
        result
    }

    pub async fn get_listings_by_seller(&self, seller_email: &str) -> Vec<entities::Listing> {
        let listings = self.in_memory_store.listings.read().await;
        let mut result: Vec<entities::Listing> = listings
            .values()
            .filter(|listing| listing.seller_email.as_str() == seller_email)
            .cloned()
            .collect();
        result.sort_by_key(|listing| listing.seq);
        result
    }

    /// Overwrites the whole descriptive field set; fields absent from the
    /// replacement become absent on the stored listing. Returns false when
    /// the listing does not exist.
    pub async fn replace_listing_fields(
        &self,
        id: ListingId,
        replace: entities::ListingReplace,
    ) -> bool {
        let mut listings = self.in_memory_store.listings.write().await;
        let Some(listing) = listings.get_mut(&id) else {
            return false;
        };
        listing.car_name = replace.car_name;
        listing.car_brand = replace.car_brand;
        listing.car_type = replace.car_type;
        listing.price = replace.price;
        listing.car_condition = replace.car_condition;
        listing.purchasing_date = replace.purchasing_date;
        listing.description = replace.description;
        listing.photo = replace.photo;
        listing.approval_status = replace.approval_status;
        listing.adding_date = replace.adding_date;
        listing.manufacture_year = replace.manufacture_year;
        listing.engine_capacity = replace.engine_capacity;
        listing.total_run = replace.total_run;
        listing.fuel_type = replace.fuel_type;
        listing.transmission_type = replace.transmission_type;
        listing.registered_year = replace.registered_year;
        listing.seller_phone = replace.seller_phone;
        true
    }

    pub async fn update_sell_status(&self, id: ListingId, sell_status: String) -> bool {
        let mut listings = self.in_memory_store.listings.write().await;
        match listings.get_mut(&id) {
            Some(listing) => {
                listing.sell_status = Some(sell_status);
                true
            }
            None => false,
        }
    }

    /// Updates every listing owned by the seller, returning how many were
    /// touched.
    pub async fn update_seller_verification(&self, seller_id: UserId, status: String) -> u64 {
        let mut listings = self.in_memory_store.listings.write().await;
        let mut modified = 0;
        for listing in listings
            .values_mut()
            .filter(|listing| listing.seller_id == seller_id)
        {
            listing.seller_verification_status = Some(status.clone());
            modified += 1;
        }
        modified
    }

    /// Atomic counter increment: the lookup and the write happen under one
    /// write lock. Returns the new count, or `None` when the listing is gone.
    pub async fn increment_total_bids(&self, id: ListingId) -> Option<u64> {
        let mut listings = self.in_memory_store.listings.write().await;
        let listing = listings.get_mut(&id)?;
        listing.total_bids += 1;
        Some(listing.total_bids)
    }

    pub async fn delete_listing(&self, id: ListingId) -> bool {
        self.in_memory_store
            .listings
            .write()
            .await
            .remove(&id)
            .is_some()
    }
}
