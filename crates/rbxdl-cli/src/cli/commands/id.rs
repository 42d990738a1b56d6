//! `rbxdl id` – show the identifier a reference resolves to.

use anyhow::{bail, Result};
use rbxdl_core::config::RbxdlConfig;
use rbxdl_core::identifier::slug_after_id;
use rbxdl_core::validate::{resolve_reference, ValidationError};

/// Prints the id, plus the URL slug after it when there is one.
pub fn run_id(cfg: &RbxdlConfig, reference: &str) -> Result<()> {
    let reference = reference.trim();
    if reference.is_empty() {
        bail!(ValidationError::MissingReference);
    }
    let (id, is_url) = resolve_reference(reference, &cfg.required_host)?;
    match is_url.then(|| slug_after_id(reference, &id)).flatten() {
        Some(slug) => println!("{}\t{}", id, slug),
        None => println!("{}", id),
    }
    Ok(())
}
