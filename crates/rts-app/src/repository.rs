//! Wiring of the configured storage and workflow client

use std::sync::Arc;

use tracing::debug;

use rts_domain::repository::{LoginAttemptRepository, WorkflowGateway};
use rts_infra::HttpWorkflowClient;
use rts_store::{AttemptStore, MemoryAttemptStore};
use rts_types::Result;

use crate::config::{AttemptStorage, Config};

/// Open the login attempt storage selected in the config
pub fn open_attempt_repo(config: &Config) -> Result<Arc<dyn LoginAttemptRepository>> {
    match config.attempt_storage {
        AttemptStorage::File => {
            let store = AttemptStore::open(config.store_dir()?)?;
            debug!("Login attempts stored at {}", store.path().display());
            Ok(Arc::new(store))
        }
        AttemptStorage::Memory => Ok(Arc::new(MemoryAttemptStore::new())),
    }
}

/// Build the HTTP workflow client from the configured endpoints
pub fn open_workflow_client(config: &Config) -> Result<Arc<dyn WorkflowGateway>> {
    let client = HttpWorkflowClient::new(config.workflow_endpoints(), config.request_timeout())?;
    Ok(Arc::new(client))
}
