//! User Data

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Clone, PartialEq)]
pub struct NewUser {
    /// UUID to assign to the user row.
    pub uuid: UserUuid,

    /// Display name.
    pub name: String,

    /// Contact email, unique across users.
    pub email: String,

    /// Opaque credential, stored as given.
    pub password: String,
}

impl Debug for NewUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NewUser")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
