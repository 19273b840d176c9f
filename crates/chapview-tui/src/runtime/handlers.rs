//! Effect handlers.
//!
//! Each handler is a plain async function that performs the remote work for
//! one effect and returns the resulting `UiEvent`. A client is built per
//! call from the session's key, so handlers share no state.

use chapview_core::api::{ChaparralClient, SearchId};
use chapview_core::config::Config;
use chapview_core::proteins::ProteinRow;
use chapview_core::viewer::Variant;
use chapview_core::workflow;

use crate::events::UiEvent;

pub async fn login(config: Config, api_key: String) -> UiEvent {
    let result = ChaparralClient::login(&config, &api_key)
        .await
        .map(|(_, user)| user);
    UiEvent::LoginFinished { api_key, result }
}

pub async fn load_searches(config: Config, api_key: String, variant: Variant) -> UiEvent {
    let result = match ChaparralClient::new(&config, api_key) {
        Ok(client) => workflow::load_searches(&client, variant).await,
        Err(err) => Err(err),
    };
    UiEvent::SearchesLoaded(result)
}

pub async fn load_overview(config: Config, api_key: String, search_id: SearchId) -> UiEvent {
    let result = match ChaparralClient::new(&config, api_key) {
        Ok(client) => workflow::load_search_overview(&client, &search_id).await,
        Err(err) => Err(err),
    };
    UiEvent::OverviewLoaded { search_id, result }
}

pub async fn resolve_link(
    config: Config,
    api_key: String,
    variant: Variant,
    search_id: SearchId,
    row: ProteinRow,
) -> UiEvent {
    let protein_name = row.name().to_string();
    let result = match ChaparralClient::new(&config, api_key) {
        Ok(client) => {
            workflow::viewer_link(&client, &config.viewer_url, variant, &search_id, &row).await
        }
        Err(err) => Err(err.into()),
    };
    UiEvent::LinkResolved {
        protein_name,
        result,
    }
}
