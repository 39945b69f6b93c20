use anyhow::{bail, Result};

use flipfeed_core::account::{AccountClient, ProfileUpdate, User};
use flipfeed_core::AppConfig;

pub async fn show(config: &AppConfig) -> Result<()> {
    let client = AccountClient::new(config)?;
    let user = client.current_user().await?;
    print_user(&user);
    Ok(())
}

pub async fn update(
    config: &AppConfig,
    full_name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    if full_name.is_none() && email.is_none() {
        bail!("Nothing to update. Pass --full-name and/or --email.");
    }

    let client = AccountClient::new(config)?;
    let current = client.current_user().await?;

    let mut update = ProfileUpdate::from_user(&current);
    if let Some(name) = full_name {
        update.full_name = name;
    }
    if let Some(email) = email {
        update.email = email;
    }

    let user = client.update_profile(&update).await?;

    println!("Profile updated successfully!\n");
    print_user(&user);
    Ok(())
}

fn print_user(user: &User) {
    println!("{}", user.display_name());
    println!("  Username: {}", user.username);
    println!("  Email:    {}", user.email);
    if let Some(name) = &user.full_name {
        println!("  Name:     {}", name);
    }
    println!(
        "  Status:   {}{}",
        if user.is_active { "active" } else { "inactive" },
        if user.is_verified { ", verified" } else { "" }
    );
    if let Some(created) = &user.created_at {
        println!("  Joined:   {}", created);
    }
}
