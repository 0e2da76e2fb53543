use serde::{Deserialize, Serialize};

use super::{LogGroupInfo, SearchParameters, SearchRequest};

/// A log group as reported by the log client. The name is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogGroupDescriptor {
    pub log_group_name: Option<String>,
    pub stored_bytes: Option<u64>,
    pub creation_time: Option<i64>,
}

impl LogGroupDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            log_group_name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// One page of a log group listing.
#[derive(Debug, Clone, Default)]
pub struct LogGroupPage {
    pub groups: Vec<LogGroupDescriptor>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub timestamp: Option<i64>,
    pub message: String,
}

impl LogEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            message: message.into(),
        }
    }

    pub fn at(timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogEventPage {
    pub events: Vec<LogEvent>,
    pub next_token: Option<String>,
}

/// State the registry keeps for one registered log document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStreamData {
    pub data: Vec<LogEvent>,
    pub parameters: SearchParameters,
    pub busy: bool,
    pub log_group_info: LogGroupInfo,
    pub next_token: Option<String>,
}

impl LogStreamData {
    pub fn new(log_group_info: LogGroupInfo, parameters: SearchParameters) -> Self {
        Self {
            data: Vec::new(),
            parameters,
            busy: false,
            log_group_info,
            next_token: None,
        }
    }

    /// The query this stream was registered with.
    pub fn request(&self) -> SearchRequest {
        SearchRequest::new(
            &self.log_group_info.group_name,
            &self.log_group_info.region_name,
            &self.parameters.filter_pattern,
        )
        .with_limit(self.parameters.limit)
    }

    /// Renders the document text, one event per line.
    pub fn render(&self) -> String {
        self.data
            .iter()
            .map(|event| match event.timestamp {
                Some(ts) => format!("{}\t{}", ts, event.message),
                None => event.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A byte range on one line of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRange {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Finds every occurrence of `pattern` in `text`. An empty pattern matches nothing.
pub fn find_highlights(text: &str, pattern: &str) -> Vec<HighlightRange> {
    if pattern.is_empty() {
        return Vec::new();
    }

    text.lines()
        .enumerate()
        .flat_map(|(line, content)| {
            content.match_indices(pattern).map(move |(start, matched)| HighlightRange {
                line,
                start,
                end: start + matched.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_and_without_timestamps() {
        let mut stream = LogStreamData::new(
            LogGroupInfo::new("/app", "us-west-2"),
            SearchParameters {
                limit: 10,
                filter_pattern: String::new(),
            },
        );
        stream.data.push(LogEvent::at(1700000000000, "START"));
        stream.data.push(LogEvent::new("plain"));

        assert_eq!(stream.render(), "1700000000000\tSTART\nplain");
    }

    #[test]
    fn test_find_highlights() {
        let ranges = find_highlights("ERROR one\nok\nERROR ERROR", "ERROR");
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], HighlightRange { line: 0, start: 0, end: 5 });
        assert_eq!(ranges[2], HighlightRange { line: 2, start: 6, end: 11 });
    }

    #[test]
    fn test_empty_pattern_highlights_nothing() {
        assert!(find_highlights("anything", "").is_empty());
    }
}
