//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::plan::Plan;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing, ephemeral use, and as the degrade target
/// when a persistent backend runs out of quota.
#[derive(Default)]
pub struct MemoryStorage {
    plans: RwLock<HashMap<String, Plan>>,
    /// When set, saving a new project beyond this many entries reports
    /// `QuotaExceeded`, mimicking a bounded backend.
    capacity: Option<usize>,
}

impl MemoryStorage {
    /// Create a new empty memory storage with unbounded capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory storage that holds at most `capacity` projects.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            plans: RwLock::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, plan: &Plan) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let plan = plan.clone();
        Box::pin(async move {
            let mut plans = self
                .plans
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            if let Some(cap) = self.capacity {
                if !plans.contains_key(&id) && plans.len() >= cap {
                    return Err(StorageError::QuotaExceeded);
                }
            }
            plans.insert(id, plan);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Plan>> {
        let id = id.to_string();
        Box::pin(async move {
            let plans = self
                .plans
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            plans.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut plans = self
                .plans
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            plans.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let plans = self
                .plans
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(plans.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let plans = self
                .plans
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(plans.contains_key(&id))
        })
    }
}
