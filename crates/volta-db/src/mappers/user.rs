//! User entity <-> model mapper

use volta_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// The password hash stays behind in the database layer; the domain entity
/// never carries it.
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            created_at: model.created_at,
        }
    }
}
