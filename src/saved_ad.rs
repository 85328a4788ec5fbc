//! Saved-ad bookkeeping: an associative record tying a listing to the user
//! who saved it, keyed by `(single_ad_id, user_email)`.

use {
    crate::kernel::entities::{
        ListingId,
        SavedAdId,
    },
    email_address::EmailAddress,
    tokio::sync::RwLock,
    uuid::Uuid,
};

#[derive(Clone, Debug)]
pub struct SavedAd {
    pub id:           SavedAdId,
    pub single_ad_id: ListingId,
    pub user_email:   EmailAddress,
    pub car_name:     Option<String>,
    pub price:        Option<i64>,
    pub photo:        Option<String>,
}

#[derive(Clone, Debug)]
pub struct SavedAdCreate {
    pub single_ad_id: ListingId,
    pub user_email:   EmailAddress,
    pub car_name:     Option<String>,
    pub price:        Option<i64>,
    pub photo:        Option<String>,
}

#[derive(Debug, Default)]
struct InMemoryStore {
    saved_ads: RwLock<Vec<SavedAd>>,
}

#[derive(Debug, Default)]
pub struct Service {
    in_memory_store: InMemoryStore,
}

impl Service {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_saved_ad(&self, create: SavedAdCreate) -> SavedAd {
        let saved_ad = SavedAd {
            id:           Uuid::new_v4(),
            single_ad_id: create.single_ad_id,
            user_email:   create.user_email,
            car_name:     create.car_name,
            price:        create.price,
            photo:        create.photo,
        };
        self.in_memory_store
            .saved_ads
            .write()
            .await
            .push(saved_ad.clone());
        saved_ad
    }

    pub async fn get_saved_ad(&self, single_ad_id: ListingId, user_email: &str) -> Option<SavedAd> {
        self.in_memory_store
            .saved_ads
            .read()
            .await
            .iter()
            .find(|ad| ad.single_ad_id == single_ad_id && ad.user_email.as_str() == user_email)
            .cloned()
    }

    pub async fn get_saved_ads_for_user(&self, user_email: &str) -> Vec<SavedAd> {
        self.in_memory_store
            .saved_ads
            .read()
            .await
            .iter()
            .filter(|ad| ad.user_email.as_str() == user_email)
            .cloned()
            .collect()
    }

    /// Removes at most one matching record, returning how many were deleted.
    pub async fn remove_saved_ad(&self, single_ad_id: ListingId, user_email: &str) -> u64 {
        let mut saved_ads = self.in_memory_store.saved_ads.write().await;
        match saved_ads
            .iter()
            .position(|ad| ad.single_ad_id == single_ad_id && ad.user_email.as_str() == user_email)
        {
            Some(index) => {
                saved_ads.remove(index);
                1
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::kernel::entities::parse_email,
    };

    fn saved_ad_create(single_ad_id: ListingId, email: &str) -> SavedAdCreate {
        SavedAdCreate {
            single_ad_id,
            user_email: parse_email(email).unwrap(),
            car_name: Some("test car".to_string()),
            price: Some(9000),
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_saved_ad_scoped_by_owner() {
        let service = Service::new();
        let ad_id = Uuid::new_v4();
        service
            .add_saved_ad(saved_ad_create(ad_id, "buyer@example.com"))
            .await;

        assert!(service
            .get_saved_ad(ad_id, "buyer@example.com")
            .await
            .is_some());
        assert!(service
            .get_saved_ad(ad_id, "other@example.com")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_remove_saved_ad_deletes_one() {
        let service = Service::new();
        let ad_id = Uuid::new_v4();
        service
            .add_saved_ad(saved_ad_create(ad_id, "buyer@example.com"))
            .await;
        service
            .add_saved_ad(saved_ad_create(Uuid::new_v4(), "buyer@example.com"))
            .await;

        assert_eq!(service.remove_saved_ad(ad_id, "buyer@example.com").await, 1);
        assert_eq!(service.remove_saved_ad(ad_id, "buyer@example.com").await, 0);
        assert_eq!(
            service.get_saved_ads_for_user("buyer@example.com").await.len(),
            1
        );
    }
}
