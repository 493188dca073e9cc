use diesel::prelude::*;

use crate::domain::types::Username;
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter};
use crate::schema::users;

impl UserReader for DieselRepository {
    fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::username.eq(username.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let insertable: DbNewUser = new_user.into();

        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(User::try_from(created)?)
    }
}
