//! Concurrent fetch orchestration.

use std::sync::Arc;

use tracing::{info, warn};

use super::roster::{join_roster, RoleAnnotation, TeamRoster};
use super::source::PresenceSource;
use crate::error::PresenceError;

/// Fetch every annotated identity concurrently and build the roster.
///
/// A failing identity is logged and left out. The call itself only fails
/// when a per-identity task cannot be joined (it panicked or was aborted).
pub async fn fetch_team(
    source: Arc<dyn PresenceSource>,
    annotations: &[RoleAnnotation],
) -> Result<TeamRoster, PresenceError> {
    let handles: Vec<_> = annotations
        .iter()
        .map(|annotation| {
            let source = Arc::clone(&source);
            let identity = annotation.identity.clone();
            tokio::spawn(async move {
                match source.fetch_presence(&identity).await {
                    Ok(snapshot) => Some(snapshot),
                    Err(e) => {
                        warn!(identity = %identity, error = %e, "Dropping team member");
                        None
                    }
                }
            })
        })
        .collect();

    let mut snapshots = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle
            .await
            .map_err(|e| PresenceError::Batch(e.to_string()))?;
        snapshots.extend(result);
    }

    let roster = join_roster(annotations, snapshots);
    info!(
        requested = annotations.len(),
        resolved = roster.len(),
        "Team presence loaded"
    );
    Ok(roster)
}
