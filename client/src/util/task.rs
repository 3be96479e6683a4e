//! Browser-only task spawning.
//!
//! TRADE-OFFS
//! ==========
//! Requests only run after hydration; on the server the future is dropped
//! unpolled so rendering stays deterministic.

use std::future::Future;

pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(fut);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(fut);
    }
}
