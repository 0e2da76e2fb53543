use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tracing::debug;
use walkdir::WalkDir;

use crate::application::LogGroupSource;
use crate::domain::{
    DomainError, LogEvent, LogEventPage, LogGroupDescriptor, LogGroupPage, SearchRequest,
};

pub const LOG_FILE_EXTENSION: &str = "log";
const DEFAULT_PAGE_SIZE: usize = 50;

/// A [`LogGroupSource`] backed by a directory of `*.log` files.
///
/// `<root>/aws/lambda/foo.log` is the log group `/aws/lambda/foo`; each line is
/// one event. A line starting with an integer followed by whitespace carries
/// that integer as its timestamp. Listing is paged `page_size` groups at a time.
pub struct LocalLogSource {
    root: PathBuf,
    page_size: usize,
}

impl LocalLogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the page of groups starting at `offset`.
    pub fn describe_page(&self, offset: usize) -> Result<LogGroupPage, DomainError> {
        let names = self.group_names()?;
        let end = (offset + self.page_size).min(names.len());
        let groups = names
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(LogGroupDescriptor::named)
            .collect();
        let next_token = (end < names.len()).then(|| end.to_string());

        debug!("Listed log groups {}..{} of {}", offset, end, names.len());
        Ok(LogGroupPage { groups, next_token })
    }

    fn group_names(&self) -> Result<Vec<String>, DomainError> {
        if !self.root.is_dir() {
            return Err(DomainError::not_found(format!(
                "Log directory not found: {}",
                self.root.display()
            )));
        }

        let mut names: Vec<String> = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry.path().extension().and_then(|ext| ext.to_str()) == Some(LOG_FILE_EXTENSION)
            })
            .filter_map(|entry| self.group_name(entry.path()))
            .collect();
        names.sort();
        Ok(names)
    }

    fn group_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        Some(format!("/{}", parts.join("/")))
    }

    fn group_path(&self, group_name: &str) -> PathBuf {
        self.root.join(format!(
            "{}.{}",
            group_name.trim_start_matches('/'),
            LOG_FILE_EXTENSION
        ))
    }
}

fn parse_event(line: &str) -> LogEvent {
    if let Some((head, rest)) = line.split_once(char::is_whitespace) {
        if let Ok(timestamp) = head.parse::<i64>() {
            return LogEvent::at(timestamp, rest.trim_start());
        }
    }
    LogEvent::new(line)
}

#[async_trait]
impl LogGroupSource for LocalLogSource {
    fn describe_log_groups(&self) -> BoxStream<'_, Result<LogGroupDescriptor, DomainError>> {
        stream::unfold(Some(0usize), move |offset| async move {
            match offset {
                None => None,
                Some(offset) => match self.describe_page(offset) {
                    Ok(page) => {
                        let next = page.next_token.as_deref().and_then(|t| t.parse().ok());
                        Some((Ok(page.groups), next))
                    }
                    Err(e) => Some((Err(e), None)),
                },
            }
        })
        .flat_map(|page| {
            let items: Vec<Result<LogGroupDescriptor, DomainError>> = match page {
                Ok(groups) => groups.into_iter().map(Ok).collect(),
                Err(e) => vec![Err(e)],
            };
            stream::iter(items)
        })
        .boxed()
    }

    async fn filter_log_events(
        &self,
        request: &SearchRequest,
        next_token: Option<&str>,
    ) -> Result<LogEventPage, DomainError> {
        let path = self.group_path(request.log_group_name());
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DomainError::not_found(format!(
                    "Log group not found: {}",
                    request.log_group_name()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let start = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| DomainError::invalid_input(format!("Invalid next token: {}", token)))?,
            None => 0,
        };

        let pattern = request.filter_pattern();
        let lines: Vec<&str> = content.lines().collect();
        let mut events = Vec::new();
        let mut next_token = None;

        for (index, line) in lines.iter().enumerate().skip(start) {
            if events.len() == request.limit() {
                next_token = Some(index.to_string());
                break;
            }
            if pattern.is_empty() || line.contains(pattern) {
                events.push(parse_event(line));
            }
        }

        debug!(
            "Read {} events from {} (next token: {:?})",
            events.len(),
            request.log_group_name(),
            next_token
        );
        Ok(LogEventPage { events, next_token })
    }
}
