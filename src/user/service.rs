use {
    super::{
        entities,
        repository::Repository,
    },
    crate::{
        api::RestError,
        kernel::{
            auth::Principal,
            entities::UserId,
        },
        models::UserRole,
    },
    std::sync::Arc,
};

pub struct Service {
    repo: Arc<Repository>,
}

impl Service {
    pub fn new() -> Self {
        Self {
            repo: Arc::new(Repository::new()),
        }
    }

    /// Idempotent on email: a duplicate registration returns `None` and
    /// performs no mutation.
    pub async fn add_user(&self, create: entities::UserCreate) -> Option<entities::User> {
        self.repo.add_user(create).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Option<entities::User> {
        self.repo.get_user_by_email(email).await
    }

    /// Every user whose role is plain `user`; administrators are excluded.
    pub async fn get_non_admin_users(&self) -> Vec<entities::User> {
        self.repo.get_users_by_role(UserRole::User).await
    }

    pub async fn is_admin(&self, email: &str) -> bool {
        self.repo
            .get_user_by_email(email)
            .await
            .is_some_and(|user| user.role == UserRole::Admin)
    }

    /// The role is re-fetched from the store on every call so that role
    /// changes take effect on the next request. A missing user record is
    /// Forbidden, never a different error kind.
    pub async fn require_admin(&self, principal: &Principal) -> Result<(), RestError> {
        if self.is_admin(&principal.email).await {
            Ok(())
        } else {
            Err(RestError::Forbidden)
        }
    }

    pub async fn update_user_details(
        &self,
        id: UserId,
        update: entities::UserDetailsUpdate,
    ) -> Result<entities::User, RestError> {
        self.repo
            .update_user_details(id, update)
            .await
            .ok_or(RestError::UserNotFound)
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
    };

    fn user_create(email: &str, role: UserRole) -> entities::UserCreate {
        entities::UserCreate {
            email: parse_email(email).unwrap(),
            role,
            name: Some("Test User".to_string()),
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_registration_inserts_nothing() {
        let service = Service::new();
        let first = service
            .add_user(user_create("seller@example.com", UserRole::User))
            .await;
        assert!(first.is_some());

        let second = service
            .add_user(user_create("seller@example.com", UserRole::User))
            .await;
        assert!(second.is_none());

        let stored = service
            .get_user_by_email("seller@example.com")
            .await
            .unwrap();
        assert_eq!(stored.id, first.unwrap().id);
    }

    #[tokio::test]
    async fn test_non_admin_listing_excludes_admins() {
        let service = Service::new();
        service
            .add_user(user_create("admin@example.com", UserRole::Admin))
            .await;
        service
            .add_user(user_create("buyer@example.com", UserRole::User))
            .await;

        let users = service.get_non_admin_users().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.as_str(), "buyer@example.com");
    }

    #[tokio::test]
    async fn test_require_admin_rejects_non_admin_and_unknown() {
        let service = Service::new();
        service
            .add_user(user_create("buyer@example.com", UserRole::User))
            .await;

        let buyer = Principal {
            email: "buyer@example.com".to_string(),
        };
        assert_eq!(
            service.require_admin(&buyer).await.unwrap_err(),
            RestError::Forbidden
        );

        let ghost = Principal {
            email: "ghost@example.com".to_string(),
        };
        assert_eq!(
            service.require_admin(&ghost).await.unwrap_err(),
            RestError::Forbidden
        );
    }

    #[tokio::test]
    async fn test_require_admin_sees_current_role() {
        let service = Service::new();
        service
            .add_user(user_create("admin@example.com", UserRole::Admin))
            .await;

        let admin = Principal {
            email: "admin@example.com".to_string(),
        };
        assert!(service.require_admin(&admin).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_details_merges_selectively() {
        let service = Service::new();
        let user = service
            .add_user(user_create("seller@example.com", UserRole::User))
            .await
            .unwrap();

        service
            .update_user_details(
                user.id,
                entities::UserDetailsUpdate {
                    phone: Some("555-0100".to_string()),
                    address: Some("1 Main St".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_user_details(
                user.id,
                entities::UserDetailsUpdate {
                    verify_status: Some("verified".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Fields absent from the second request are untouched.
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.address.as_deref(), Some("1 Main St"));
        assert_eq!(updated.verify_status.as_deref(), Some("verified"));
        assert_eq!(updated.name.as_deref(), Some("Test User"));
    }

    #[tokio::test]
    async fn test_update_user_details_unknown_id() {
        let service = Service::new();
        assert_eq!(
            service
                .update_user_details(uuid::Uuid::new_v4(), Default::default())
                .await
                .unwrap_err(),
            RestError::UserNotFound
        );
    }
}
