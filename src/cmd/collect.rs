use chrono::Utc;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::store::write_snapshot;
use crate::workflow::collect::{CollectionOutcome, collect_activity};

/// Collects activity as of now and persists the snapshot.
pub async fn run(ctx: &AppContext) -> AppResult<CollectionOutcome> {
    let outcome = collect_activity(ctx, Utc::now()).await;
    write_snapshot(&ctx.config.output_path, &outcome.snapshot)?;
    Ok(outcome)
}
