//! Site Vault Demo - walks through the credential lifecycle
//!
//! Run with: cargo run -p vault-core --example demo
//! Set RUST_LOG=debug to see storage reads and writes.

use std::sync::Arc;
use tempfile::TempDir;
use vault_core::{CredentialManager, Field, FileStore, SettingsManager};

fn print_table(manager: &CredentialManager) {
    if manager.is_empty() {
        println!("  No credentials saved yet.");
        return;
    }
    for (index, record) in manager.records().iter().enumerate() {
        println!("  [{}] {:<10} {:<28} {}", index, record.site, record.url, record.password);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage_dir = temp_dir.path().to_path_buf();
    let settings = SettingsManager::new(&storage_dir).get().clone();

    println!("=== Phase 1: Save two credentials ===");
    {
        let storage = FileStore::open(storage_dir.clone())
            .expect("Failed to open storage")
            .with_pretty(settings.pretty_json);
        let mut manager = CredentialManager::with_settings(Arc::new(storage), &settings)
            .expect("Failed to load credentials");

        println!("{} ({})", manager.mode().form_title(), manager.mode().action_label());
        for (site, url, password) in [
            ("GitHub", "https://github.com", "longenough1"),
            ("Mail", "https://mail.example.com", "another-pass"),
        ] {
            manager.update_field(Field::Site, site);
            manager.update_field(Field::Url, url);
            manager.update_field(Field::Password, password);
            manager.commit().expect("Failed to save credential");
        }
        print_table(&manager);

        println!("\n=== Phase 2: Rejected form ===");
        manager.update_field(Field::Site, "");
        manager.update_field(Field::Url, "not-a-url");
        manager.update_field(Field::Password, "short");
        if let Err(e) = manager.commit() {
            println!("Commit rejected: {}", e);
        }
        for (field, message) in manager.errors().iter() {
            println!("  {}: {}", field, message);
        }
        manager.cancel_edit();
    }

    println!("\n=== Phase 3: Reopen, edit and delete ===");
    {
        let storage = FileStore::open(storage_dir.clone()).expect("Failed to open storage");
        let mut manager = CredentialManager::with_settings(Arc::new(storage), &settings)
            .expect("Failed to load credentials");
        println!("Loaded {} credentials", manager.len());

        manager.begin_edit(0).expect("No credential at index 0");
        println!("{} ({})", manager.mode().form_title(), manager.mode().action_label());
        manager.update_field(Field::Password, "newpassword1");
        manager.commit().expect("Failed to update credential");

        manager.begin_edit(1).expect("No credential at index 1");
        manager.remove(1).expect("Failed to delete credential");
        println!("Mode after deleting the edited credential: {:?}", manager.mode());
        print_table(&manager);
    }
}
