use {
    super::entities,
    crate::{
        kernel::entities::UserId,
        models::UserRole,
    },
    std::collections::HashMap,
    tokio::sync::RwLock,
    uuid::Uuid,
};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    // Keyed by email, the unique registration key.
    users: RwLock<HashMap<String, entities::User>>,
}

#[derive(Debug, Default)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the user unless the email is already registered. The check and
    /// the insert happen under a single write lock, so concurrent duplicate
    /// registrations cannot both succeed.
    pub async fn add_user(&self, create: entities::UserCreate) -> Option<entities::User> {
        let mut users = self.in_memory_store.users.write().await;
        let key = create.email.as_str().to_string();
        if users.contains_key(&key) {
            return None;
        }
        let user = entities::User {
            id:                   Uuid::new_v4(),
            email:                create.email,
            role:                 create.role,
            name:                 create.name,
            photo:                create.photo,
            phone:                None,
            address:              None,
            verification_request: None,
            verify_status:        None,
        };
        users.insert(key, user.clone());
        Some(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Option<entities::User> {
        self.in_memory_store.users.read().await.get(email).cloned()
    }

    pub async fn get_users_by_role(&self, role: UserRole) -> Vec<entities::User> {
        let users = self.in_memory_store.users.read().await;
        let mut result: Vec<entities::User> =
            users.values().filter(|u| u.role == role).cloned().collect();
        result.sort_by(|a, b| a.email.as_str().cmp(b.email.as_str()));
        result
    }

    /// Merges only the populated fields into the stored user; absent fields
    /// are left untouched.
    pub async fn update_user_details(
        &self,
        id: UserId,
        update: entities::UserDetailsUpdate,
    ) -> Option<entities::User> {
        let mut users = self.in_memory_store.users.write().await;
        let user = users.values_mut().find(|u| u.id == id)?;
        if let Some(phone) = update.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = update.address {
            user.address = Some(address);
        }
        if let Some(request) = update.verification_request {
            user.verification_request = Some(request);
        }
        if let Some(status) = update.verify_status {
            user.verify_status = Some(status);
        }
        Some(user.clone())
    }
}
