// SPDX-License-Identifier: GPL-3.0-only
use std::future::Future;
use tracing::{debug, info};
use crate::refresh::RefreshOrchestrator;
use crate::session::{Session, StatusSink};

/// Drive one session until `shutdown` resolves.
///
/// Renders once on start, kicks off a refresh cycle, then re-renders on
/// every manifest notification. The refresh task is left to finish on its
/// own if shutdown comes first.
pub async fn run<S>(
    session: &mut Session,
    orchestrator: &RefreshOrchestrator,
    sink: &mut dyn StatusSink,
    shutdown: S,
) where
    S: Future<Output = ()>,
{
    let initial = session.start().await;
    sink.status_changed(&initial);

    if orchestrator.activate().is_none() {
        debug!("Refresh already running for this orchestrator");
    }

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            change = session.next_change() => match change {
                Some(snapshot) => sink.status_changed(&snapshot),
                None => break,
            },
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    session.stop();
}
