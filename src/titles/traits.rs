// Title generator trait.
//
// Implementations must be async because the default backend is an HTTP API.
// The local template generator implements the same trait with a synchronous
// body so the two are interchangeable at the call site.

use anyhow::Result;
use async_trait::async_trait;

use crate::category::Category;

/// Trait for suggesting post titles for a board.
#[async_trait]
pub trait TitleGenerator: Send + Sync {
    /// Suggest up to `count` titles for the post text.
    ///
    /// Implementations fail soft where possible: exhausted retries should
    /// return fallback titles rather than an error.
    async fn suggest(&self, text: &str, category: Category, count: usize) -> Result<Vec<String>>;
}
