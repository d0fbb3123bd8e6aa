use std::sync::Arc;

use anyhow::Result;
use wayfarer_application::AuthService;
use wayfarer_infrastructure::{JsonKeyValueStore, StoredUserRepository, WayfarerPaths};

fn auth_service(paths: &WayfarerPaths) -> Result<AuthService> {
    let store = Arc::new(JsonKeyValueStore::new(paths.storage_file()?));
    Ok(AuthService::new(Arc::new(StoredUserRepository::new(store))))
}

pub async fn login(paths: &WayfarerPaths, username: &str, password: &str) -> Result<()> {
    let user = auth_service(paths)?.login(username, password).await?;
    println!("Signed in as {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn register(
    paths: &WayfarerPaths,
    username: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let user = auth_service(paths)?
        .register(username, email, password)
        .await?;
    println!("Registered and signed in as {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn logout(paths: &WayfarerPaths) -> Result<()> {
    auth_service(paths)?.logout().await?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(paths: &WayfarerPaths) -> Result<()> {
    match auth_service(paths)?.current_user().await? {
        Some(user) => println!("{} <{}> (id {})", user.username, user.email, user.id),
        None => println!("Not signed in."),
    }
    Ok(())
}
