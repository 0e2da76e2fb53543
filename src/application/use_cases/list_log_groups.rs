use std::sync::Arc;

use futures_util::StreamExt;
use tracing::{debug, info};

use crate::application::LogGroupSource;
use crate::domain::DomainError;

/// Drains the paginated log group listing into a flat list of names.
pub struct ListLogGroupsUseCase {
    source: Arc<dyn LogGroupSource>,
}

impl ListLogGroupsUseCase {
    pub fn new(source: Arc<dyn LogGroupSource>) -> Self {
        Self { source }
    }

    pub async fn execute(&self) -> Result<Vec<String>, DomainError> {
        let mut groups = self.source.describe_log_groups();
        let mut names = Vec::new();
        let mut unnamed = 0usize;

        while let Some(group) = groups.next().await {
            match group?.log_group_name {
                Some(name) => names.push(name),
                None => unnamed += 1,
            }
        }

        if unnamed > 0 {
            debug!("Skipped {} log groups without a name", unnamed);
        }
        info!("Found {} log groups", names.len());

        Ok(names)
    }
}
