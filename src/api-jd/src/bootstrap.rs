use anyhow::Context;
use chrono::Local;
use core_jd::BootstrapAdmin;
use data_model_jd::db::DbPool;
use data_model_jd::models::NewAdmin;
use data_model_jd::repo;
use tracing::info;

use crate::auth::password::hash_password;

/// Guarantees an admin login exists before the API starts serving.
///
/// Runs once at startup: when no admin with the seed username exists the
/// seed account is created, otherwise nothing happens. Restarting against
/// the same database never duplicates the account.
pub async fn ensure_default_admin(pool: &DbPool, seed: &BootstrapAdmin) -> anyhow::Result<()> {
    let mut conn = pool
        .get()
        .await
        .context("checking for the default admin account")?;

    if repo::username_exists(&mut conn, &seed.username).await? {
        return Ok(());
    }

    let password_hash =
        hash_password(&seed.password).context("hashing the default admin password")?;

    repo::insert_admin(
        &mut conn,
        &NewAdmin {
            username: seed.username.clone(),
            email: seed.email.clone(),
            password_hash,
            created_at: Local::now().naive_local(),
        },
    )
    .await
    .context("creating the default admin account")?;

    info!(username = %seed.username, "created default admin account");
    Ok(())
}
