use std::sync::Arc;
use tracing::info;
use circulation::assets::domain::model::AssetEntity;
use circulation::circulation::command::check_in_item_cmd::{CheckInItemCommand, CheckInItemCommandRequest};
use circulation::circulation::command::check_out_item_cmd::{CheckOutItemCommand, CheckOutItemCommandRequest};
use circulation::circulation::command::mark_found_cmd::{MarkFoundCommand, MarkFoundCommandRequest};
use circulation::circulation::command::mark_lost_cmd::{MarkLostCommand, MarkLostCommandRequest};
use circulation::circulation::command::place_hold_cmd::{PlaceHoldCommand, PlaceHoldCommandRequest};
use circulation::circulation::factory::create_circulation_service;
use circulation::core::command::{Command, CommandError};
use circulation::core::domain::Configuration;
use circulation::core::library::{AssetStatus, LibraryError};
use circulation::core::repository::CirculationStore;
use circulation::core::repository::memory_store::MemoryStore;
use circulation::gateway::GatewayPublisherVia;
use circulation::patrons::domain::directory::MemoryPatronDirectory;
use circulation::patrons::dto::PatronDto;
use circulation::utils::logging::setup_tracing;

async fn seed_asset(store: &MemoryStore, title: &str) -> Result<String, LibraryError> {
    let asset = AssetEntity::new(title, AssetStatus::Available);
    let mut tx = store.begin().await?;
    tx.assets().create(&asset)?;
    tx.commit()?;
    Ok(asset.asset_id)
}

// Runs a desk session against in-process storage and logs every outcome.
#[tokio::main]
async fn main() -> Result<(), CommandError> {
    setup_tracing();

    let config = Configuration::new("main");
    let store = Arc::new(MemoryStore::new());
    let directory = Arc::new(MemoryPatronDirectory::new());
    let ada = PatronDto::new("card-ada", "Ada", "Lovelace", "ada@library.org");
    let alan = PatronDto::new("card-alan", "Alan", "Turing", "alan@library.org");
    directory.add_patron(ada.clone()).await;
    directory.add_patron(alan.clone()).await;
    let asset_id = seed_asset(&store, "Notes on the Analytical Engine").await?;

    let svc = create_circulation_service(&config, store.clone(), directory.clone(), GatewayPublisherVia::Logs);
    let check_out = CheckOutItemCommand::new(svc.clone());
    let check_in = CheckInItemCommand::new(svc.clone());
    let place_hold = PlaceHoldCommand::new(svc.clone());
    let mark_lost = MarkLostCommand::new(svc.clone());
    let mark_found = MarkFoundCommand::new(svc.clone());

    let res = check_out.execute(CheckOutItemCommandRequest::new(asset_id.as_str(), ada.card_id.as_str())).await?;
    info!(outcome = ?res.outcome, "check out");
    let res = place_hold.execute(PlaceHoldCommandRequest::new(asset_id.as_str(), alan.card_id.as_str())).await?;
    info!(hold_id = res.hold.hold_id.as_str(), "hold");
    let res = check_in.execute(CheckInItemCommandRequest::new(asset_id.as_str())).await?;
    info!(outcome = ?res.outcome, "check in");
    info!(patron = svc.get_current_checkout_patron(asset_id.as_str()).await?.as_str(), "current borrower");

    let res = mark_lost.execute(MarkLostCommandRequest::new(asset_id.as_str())).await?;
    info!(status = %res.status, "mark lost");
    let res = mark_found.execute(MarkFoundCommandRequest::new(asset_id.as_str())).await?;
    info!(status = %res.status, "mark found");

    let page = svc.get_all_checkouts(None, config.query_page_size).await?;
    info!(active = page.records.len(), "active checkouts");
    for history in svc.get_checkout_history(asset_id.as_str()).await? {
        info!(card_id = history.card_id.as_str(), checked_out = %history.checked_out,
            checked_in = ?history.checked_in, "history");
    }
    Ok(())
}
