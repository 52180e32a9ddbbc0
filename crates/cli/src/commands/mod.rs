//! CLI subcommands.

pub mod counts;
pub mod seed;

use gehna_datastore::DocStore;
use secrecy::SecretString;

/// Build a document store client from `DOCSTORE_*` environment variables.
pub fn docstore_from_env() -> Result<DocStore, Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DOCSTORE_BASE_URL")
        .map_err(|_| "DOCSTORE_BASE_URL is not set".to_owned())?;
    let api_key = std::env::var("DOCSTORE_API_KEY")
        .map_err(|_| "DOCSTORE_API_KEY is not set".to_owned())?;

    Ok(DocStore::http(&base_url, &SecretString::from(api_key))?)
}
