//! Landing view: routes to the home view of the logged-in role

use super::{Context, catalogue, houses, session::landing_hint};
use anyhow::Result;
use logis_core::{AccessGuard, Landing};

pub async fn show(ctx: &Context) -> Result<()> {
    let claims = ctx.enter(AccessGuard::authenticated())?;
    let landing = Landing::for_role(claims.as_ref().and_then(|c| c.role.as_ref()));

    if !ctx.json
        && let Some(name) = ctx.api.display_name()?
    {
        println!("Hello, {}!\n", name);
    }

    match landing {
        Landing::Houses => houses::list(ctx).await,
        Landing::Catalogue => catalogue::show(ctx).await,
        Landing::Generic => {
            if !ctx.emit_json(&serde_json::json!({ "landing": "generic" }))? {
                println!("{}", landing_hint(landing));
                println!("See your contracts with `logis contracts list`.");
            }
            Ok(())
        }
    }
}
