use std::sync::Arc;

use crate::bbb::BbbClient;
use crate::config::Config;
use crate::error::Result;
use crate::meetings::MeetingProvisioner;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub provisioner: Arc<MeetingProvisioner>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let bbb = BbbClient::new(config)?;

        Ok(Self {
            provisioner: Arc::new(MeetingProvisioner::new(bbb)),
        })
    }
}
