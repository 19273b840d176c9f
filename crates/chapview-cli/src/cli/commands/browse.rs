//! One-shot browsing commands: print what the dashboard would show.

use anyhow::{Context, Result};
use chapview_core::api::{ChaparralApi, ChaparralClient, SearchId, UserProfile};
use chapview_core::config::{API_KEY_ENV, Config};
use chapview_core::viewer::Variant;
use chapview_core::workflow::{self, ProteinTable};

use crate::cli::tables;

async fn authenticate(
    config: &Config,
    api_key: Option<&str>,
) -> Result<(ChaparralClient, UserProfile)> {
    let api_key = api_key
        .with_context(|| format!("No API key. Pass --api-key or set {API_KEY_ENV}."))?;
    ChaparralClient::login(config, api_key)
        .await
        .context("login failed")
}

pub async fn whoami(config: &Config, api_key: Option<&str>) -> Result<()> {
    let (_client, user) = authenticate(config, api_key).await?;
    println!("{}", user.display_line());
    Ok(())
}

pub async fn searches(
    config: &Config,
    api_key: Option<&str>,
    variant: Variant,
    all: bool,
) -> Result<()> {
    let (client, _user) = authenticate(config, api_key).await?;

    let searches = if all {
        client.list_search_results(None).await
    } else {
        workflow::load_searches(&client, variant).await
    }
    .context("load search results")?;

    if searches.is_empty() {
        println!("No search results found.");
        return Ok(());
    }
    println!("{}", tables::search_table(&searches));
    Ok(())
}

pub async fn proteins(
    config: &Config,
    api_key: Option<&str>,
    variant: Variant,
    search_id: &SearchId,
) -> Result<()> {
    let (client, _user) = authenticate(config, api_key).await?;
    let overview = workflow::load_search_overview(&client, search_id)
        .await
        .with_context(|| format!("load search result {search_id}"))?;

    println!(
        "{}",
        tables::search_table(std::slice::from_ref(&overview.search))
    );
    match overview.proteins {
        ProteinTable::Empty => {
            eprintln!("Warning: no proteins found for search result {search_id}.");
        }
        ProteinTable::Rows(rows) => {
            println!("{}", tables::protein_table(&rows, variant));
        }
    }
    Ok(())
}

pub async fn link(
    config: &Config,
    api_key: Option<&str>,
    variant: Variant,
    search_id: &SearchId,
    protein_name: &str,
) -> Result<()> {
    let (client, _user) = authenticate(config, api_key).await?;
    let overview = workflow::load_search_overview(&client, search_id)
        .await
        .with_context(|| format!("load search result {search_id}"))?;

    let row = overview
        .proteins
        .rows()
        .iter()
        .find(|row| row.name() == protein_name)
        .with_context(|| format!("protein '{protein_name}' not found in search {search_id}"))?;

    let link = workflow::viewer_link(&client, &config.viewer_url, variant, search_id, row)
        .await
        .with_context(|| format!("build viewer link for '{protein_name}'"))?;
    tracing::info!(protein = %link.protein, %variant, "viewer link built");

    println!("{}", link.url);
    Ok(())
}
