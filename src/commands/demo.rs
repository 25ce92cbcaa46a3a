use anyhow::Result;
use log::error;
use std::fmt::Display;
use std::future::Future;

use super::list::{active_table, queued_table};
use super::format::format_bytes;
use crate::client::TorboxClient;

/// Hash used for the cache check step (Ubuntu 22.04 desktop ISO).
const DEMO_HASH: &str = "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0";
const DEMO_QUERY: &str = "ubuntu";

/// Walk through most read-only endpoints, narrating each step
///
/// A failing step is logged and the walkthrough moves on.
pub async fn demo(client: &TorboxClient) -> Result<()> {
    let general = &client.general;

    step("User profile", general.user(), |user| {
        println!("  {} (plan {}, server {})", user.email, user.plan, user.server);
    })
    .await;

    step("Account statistics", general.stats(), |stats| {
        println!(
            "  {} torrents ({} active, {} queued), {} downloaded",
            stats.total_torrents,
            stats.active_torrents,
            stats.queued_torrents,
            format_bytes(stats.total_downloaded)
        );
    })
    .await;

    step("Active torrents", general.active_torrents(), |torrents| {
        active_table(&torrents).printstd();
    })
    .await;

    step("Queued torrents", general.queued_torrents(), |queued| {
        queued_table(&queued).printstd();
    })
    .await;

    step("Usenet downloads", general.usenet_list(), |downloads| {
        for download in downloads {
            println!("  {} {} [{}]", download.id, download.name, download.download_state);
        }
    })
    .await;

    step("Notifications", general.notifications(), |notifications| {
        for notification in notifications {
            println!("  {}: {}", notification.title, notification.message);
        }
    })
    .await;

    step("Integration jobs", general.integration_jobs(), |jobs| {
        for job in jobs {
            println!("  {} -> {} ({})", job.file_name, job.destination, job.status);
        }
    })
    .await;

    step("Cache check", general.check_cached(DEMO_HASH), |cached| {
        if cached.is_empty() {
            println!("  {} is not cached", DEMO_HASH);
        }
        for item in cached {
            println!("  {} ({})", item.name, format_bytes(item.size));
        }
    })
    .await;

    step("Search", general.search_torrents(DEMO_QUERY), |results| {
        for result in results.iter().take(5) {
            println!("  {} ({} seeders)", result.title(), result.last_known_seeders);
        }
    })
    .await;

    Ok(())
}

async fn step<T, E, F>(title: &str, call: F, show: impl FnOnce(T))
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    println!("== {} ==", title);
    match call.await {
        Ok(value) => show(value),
        Err(e) => error!("{} failed: {}", title, e),
    }
}
