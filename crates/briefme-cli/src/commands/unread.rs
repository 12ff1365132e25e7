use anyhow::Result;
use briefme_core::summaries::UnreadCountStore;

use crate::context::AppContext;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let store = UnreadCountStore::new(ctx.gateway.clone(), ctx.storage.clone());

    match store.refresh().await {
        Some(count) => println!("{}", count),
        None => println!("Unread count unavailable"),
    }
    Ok(())
}
