//! CLI smoke entry point.
//!
//! # Responsibility
//! - Seed a store, run one scripted admin session, and print the result.
//! - Keep output deterministic apart from the current date.
//!
//! Usage: `groupdesk_cli [LOG_DIR]`. With an absolute `LOG_DIR`, core logs
//! are written there.

use groupdesk_core::{
    default_log_level, init_logging, CommunityPatch, GroupDesk, GroupFilter, GroupStore,
    NewGroup, NewParticipant, Privacy, StoreConfig, StoreEvent, SystemClock,
};
use log::warn;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("groupdesk_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = std::env::args().nth(1) {
        init_logging(default_log_level(), &log_dir)?;
    }

    let mut store = GroupStore::new(StoreConfig::default(), SystemClock);
    store.subscribe(|event: &StoreEvent, revision: u64| {
        println!("  [rev {revision}] {}", event.name());
    });
    let mut desk = GroupDesk::new(store);

    println!("groupdesk_core version={}", groupdesk_core::core_version());
    println!("session:");

    let group = desk.create_group(
        NewGroup::new("Weekend Hikers", Privacy::Public).with_description("Trail plans"),
    )?;
    let bob = desk.add_participant(group.id, NewParticipant::new("Bob", "+15550001"))?;
    desk.promote_participant(group.id, bob.id)?;

    let community = desk
        .store()
        .communities()
        .first()
        .map(|c| c.id)
        .ok_or("fixture community missing")?;
    desk.add_group_to_community(community, group.id)?;
    desk.edit_community(
        community,
        CommunityPatch {
            description: Some(Some("Tech and outdoors".to_string())),
            ..CommunityPatch::default()
        },
    )?;

    if let Err(err) = desk.create_group(NewGroup::new("x", Privacy::Private)) {
        warn!("event=cli_demo module=cli status=rejected reason={err}");
        println!("  rejected: {err}");
    }

    let stats = desk.dashboard_stats();
    println!(
        "stats: groups={} participants={} communities={} active={}",
        stats.total_groups, stats.total_participants, stats.communities, stats.active_groups
    );
    let matches: Vec<&str> = desk
        .search_groups(&GroupFilter::term("team"))
        .into_iter()
        .map(|g| g.name.as_str())
        .collect();
    println!("search 'team': {matches:?}");

    println!("{}", desk.store().snapshot().to_json_pretty()?);
    Ok(())
}
