//! Print the Argon2 hash to put in `auth.admin_password_hash`
//!
//! Usage: `hash-password <password>`

use anyhow::{bail, Context};

fn main() -> anyhow::Result<()> {
    let password = std::env::args()
        .nth(1)
        .context("Usage: hash-password <password>")?;
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let hash = libris_server::services::auth::hash_password(&password)?;
    println!("{}", hash);
    Ok(())
}
