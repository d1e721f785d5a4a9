//! Delivers configuration reloads to attached presentation surfaces.
//!
//! Each surface is the push half of one bridge: a `watch` sender whose
//! receiver lives in the view process.  `watch` was chosen deliberately —
//! it keeps exactly one value, so a surface that consumes slowly skips
//! straight to the newest configuration ("latest wins") but can never see
//! pushes out of chronological order.  Redundant delivery is harmless
//! because receivers replace their cache wholesale.
//!
//! The broadcaster also enforces generation ordering across reloads: a push
//! whose generation is not newer than the last published one is dropped.
//! Generations are stamped at reload trigger time, so the last write by
//! trigger time wins even if an older reload finishes late.

use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use veneer_core::ConfigPush;

/// The host end of one surface's push pipe.
pub type SurfaceSender = watch::Sender<Option<ConfigPush>>;

struct Surface {
    id: Uuid,
    sender: SurfaceSender,
}

/// Fans configuration pushes out to every connected surface.
#[derive(Default)]
pub struct ReloadBroadcaster {
    surfaces: Vec<Surface>,
    last_generation: Option<u64>,
}

impl ReloadBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a surface and returns its id (used only in logs).
    pub fn attach(&mut self, sender: SurfaceSender) -> Uuid {
        let id = Uuid::new_v4();
        info!(surface = %id, "presentation surface attached");
        self.surfaces.push(Surface { id, sender });
        id
    }

    /// Number of currently attached surfaces, including ones whose view may
    /// have gone away since the last broadcast.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Delivers `push` to every live surface; returns how many received it.
    ///
    /// Surfaces whose receiving side is gone are detached.  A push that is
    /// not newer than the last published generation is dropped entirely.
    pub fn broadcast(&mut self, push: ConfigPush) -> usize {
        if let Some(last) = self.last_generation {
            if push.generation <= last {
                warn!(
                    generation = push.generation,
                    last, "dropping stale configuration push"
                );
                return 0;
            }
        }
        self.last_generation = Some(push.generation);

        self.surfaces.retain(|surface| {
            if surface.sender.is_closed() {
                debug!(surface = %surface.id, "presentation surface detached");
                return false;
            }
            true
        });

        for surface in &self.surfaces {
            surface.sender.send_replace(Some(push.clone()));
        }
        info!(
            generation = push.generation,
            surfaces = self.surfaces.len(),
            "configuration push delivered"
        );
        self.surfaces.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
