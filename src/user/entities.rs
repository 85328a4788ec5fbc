use {
    crate::{
        kernel::entities::UserId,
        models::UserRole,
    },
    email_address::EmailAddress,
};

#[derive(Clone, Debug)]
pub struct User {
    pub id:                   UserId,
    pub email:                EmailAddress,
    pub role:                 UserRole,
    pub name:                 Option<String>,
    pub photo:                Option<String>,
    pub phone:                Option<String>,
    pub address:              Option<String>,
    pub verification_request: Option<String>,
    pub verify_status:        Option<String>,
}

#[derive(Clone, Debug)]
pub struct UserCreate {
    pub email: EmailAddress,
    pub role:  UserRole,
    pub name:  Option<String>,
    pub photo: Option<String>,
}

/// Only the fields present in the request are merged into the stored user.
#[derive(Clone, Debug, Default)]
pub struct UserDetailsUpdate {
    pub phone:                Option<String>,
    pub address:              Option<String>,
    pub verification_request: Option<String>,
    pub verify_status:        Option<String>,
}
