//! Platform listing command.

use crate::engine::Engine;

/// Print every configured platform and what it may do
pub fn cmd_platforms(engine: &Engine, json: bool) -> anyhow::Result<()> {
    let platforms = engine.list_platforms();

    if json {
        println!("{}", serde_json::to_string_pretty(&platforms)?);
        return Ok(());
    }

    println!("{:<13} {:<10} {:<5} {:<8} {:<8} Capabilities", "Tag", "Name", "API", "Website", "Default");
    for p in &platforms {
        println!(
            "{:<13} {:<10} {:<5} {:<8} {:<8} {}",
            p.tag,
            p.name,
            yes_no(p.enabled_for_api),
            yes_no(p.enabled_for_website),
            yes_no(p.default),
            p.capabilities.join(", ")
        );
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
