//! Aggregate search command.

use tokio::runtime::Runtime;

use crate::engine::Engine;
use crate::platform::{Mode, SearchKind};
use crate::search::AggregatedResult;

/// Search several platforms and print the merged results
#[allow(clippy::too_many_arguments)]
pub fn cmd_search(
    rt: &Runtime,
    engine: &Engine,
    kind: SearchKind,
    query: &str,
    platforms: &[String],
    limit: usize,
    mode: Mode,
    json: bool,
) -> anyhow::Result<()> {
    let results = rt.block_on(engine.aggregate_search(kind, query, limit, mode, platforms));

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(query, &results);
    }
    Ok(())
}

pub(super) fn print_results(query: &str, results: &[AggregatedResult]) {
    if results.is_empty() {
        println!("No results for \"{}\".", query);
        return;
    }

    println!("{} result(s) for \"{}\":", results.len(), query);
    println!();
    for (i, result) in results.iter().enumerate() {
        let entity = &result.entity;
        println!(
            "{:>2}. {} - {}  [{} {:.2}]",
            i + 1,
            entity.artist(),
            entity.title(),
            entity.kind_name(),
            result.score
        );
        for (platform, links) in &entity.links {
            if let Some(link) = links.first() {
                println!("      {:<13} {}", platform, link);
            }
        }
    }
}
