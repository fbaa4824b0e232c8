//! Permalink resolution command.

use tokio::runtime::Runtime;

use super::search::print_results;
use crate::engine::Engine;
use crate::platform::{Mode, SearchKind};

/// Resolve a link; when it yields no entity, search its query words instead
pub fn cmd_resolve(rt: &Runtime, engine: &Engine, url: &str, mode: Mode, json: bool) -> anyhow::Result<()> {
    rt.block_on(async {
        let result = engine.resolve_permalink(url, mode).await?;

        if let Some(entity) = &result.entity {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            println!("{} - {}  [{}]", entity.artist(), entity.title(), entity.kind_name());
            if let Some(platform) = &result.platform {
                println!("Resolved on {}", platform);
            }
            if !entity.picture().is_empty() {
                println!("Cover: {}", entity.picture());
            }
            for (platform, links) in &entity.links {
                for link in links {
                    println!("  {:<13} {}", platform, link);
                }
            }
            return Ok(());
        }

        let query = result.query_words.join(" ");
        tracing::info!(query = %query, "No entity resolved, searching instead");
        let results = engine
            .aggregate_search::<&str>(SearchKind::Track, &query, 0, mode, &[])
            .await;

        if json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            print_results(&query, &results);
        }
        Ok(())
    })
}
