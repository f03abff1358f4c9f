use crate::cli::CreateUserArgs;
use crate::error::Result as ServerErrorResult;

use lms_core::{NewUser, User};
use lms_db::UserRepository;

use log::info;
use sqlx::SqlitePool;

/// Validate, hash and insert a new account
pub async fn create_user(pool: SqlitePool, args: CreateUserArgs) -> ServerErrorResult<User> {
    let mut new_user = NewUser::new(args.username, args.password)
        .with_email(args.email)
        .with_name(args.first_name, args.last_name);
    if args.inactive {
        new_user = new_user.inactive();
    }

    let user = UserRepository::new(pool).create(&new_user).await?;
    info!(
        "Created user {} ({}, active={})",
        user.id, user.username, user.is_active
    );

    Ok(user)
}
