use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ChatMessage, ModelIdentifier};
use crate::domain::DomainError;

const DEFAULT_BRANCH_NAME: &str = "main";

/// One linear message history within a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationBranch {
    id: u32,
    name: String,
    messages: Vec<ChatMessage>,
    attachments: Vec<PathBuf>,
    created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<ModelIdentifier>,
}

impl ConversationBranch {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            messages: Vec::new(),
            attachments: Vec::new(),
            created_at: current_timestamp(),
            description: None,
            model: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_model(mut self, model: ModelIdentifier) -> Self {
        self.model = Some(model);
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn attachments(&self) -> &[PathBuf] {
        &self.attachments
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn model(&self) -> Option<ModelIdentifier> {
        self.model
    }

    pub fn set_model(&mut self, model: ModelIdentifier) {
        self.model = Some(model);
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn attach_file(&mut self, path: impl Into<PathBuf>) {
        self.attachments.push(path.into());
    }
}

/// A conversation with one or more branches, exactly one of which is current.
/// `current_branch_id` always names a branch in `branches`; deserialization
/// rejects input that breaks this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawThread")]
pub struct ConversationThread {
    id: String,
    name: String,
    branches: Vec<ConversationBranch>,
    current_branch_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_prompt_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawThread {
    id: String,
    name: String,
    branches: Vec<ConversationBranch>,
    current_branch_id: u32,
    #[serde(default)]
    system_prompt_id: Option<String>,
}

impl TryFrom<RawThread> for ConversationThread {
    type Error = DomainError;

    fn try_from(raw: RawThread) -> Result<Self, Self::Error> {
        if raw.branches.is_empty() {
            return Err(DomainError::invalid_input(format!(
                "Thread {} has no branches",
                raw.id
            )));
        }

        let mut ids: Vec<u32> = raw.branches.iter().map(ConversationBranch::id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(DomainError::invalid_input(format!(
                "Thread {} has duplicate branch ids",
                raw.id
            )));
        }

        if ids.binary_search(&raw.current_branch_id).is_err() {
            return Err(DomainError::invalid_input(format!(
                "Thread {} has no branch {}",
                raw.id, raw.current_branch_id
            )));
        }

        Ok(Self {
            id: raw.id,
            name: raw.name,
            branches: raw.branches,
            current_branch_id: raw.current_branch_id,
            system_prompt_id: raw.system_prompt_id,
        })
    }
}

impl ConversationThread {
    /// Creates a thread with a single empty branch.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let branch = ConversationBranch::new(0, DEFAULT_BRANCH_NAME);
        Self {
            id: id.into(),
            name: name.into(),
            current_branch_id: branch.id(),
            branches: vec![branch],
            system_prompt_id: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt_id: impl Into<String>) -> Self {
        self.system_prompt_id = Some(prompt_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branches(&self) -> &[ConversationBranch] {
        &self.branches
    }

    pub fn current_branch_id(&self) -> u32 {
        self.current_branch_id
    }

    pub fn system_prompt_id(&self) -> Option<&str> {
        self.system_prompt_id.as_deref()
    }

    pub fn branch(&self, id: u32) -> Option<&ConversationBranch> {
        self.branches.iter().find(|b| b.id() == id)
    }

    pub fn current_branch(&self) -> &ConversationBranch {
        // current_branch_id is kept valid by every mutator
        self.branches
            .iter()
            .find(|b| b.id() == self.current_branch_id)
            .unwrap_or(&self.branches[0])
    }

    pub fn current_branch_mut(&mut self) -> &mut ConversationBranch {
        let current = self.current_branch_id;
        let index = self
            .branches
            .iter()
            .position(|b| b.id() == current)
            .unwrap_or(0);
        &mut self.branches[index]
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.current_branch_mut().push_message(message);
    }

    /// Adds an empty branch and returns its id. The current branch is unchanged.
    pub fn add_branch(&mut self, name: impl Into<String>) -> u32 {
        let id = self.next_branch_id();
        self.branches.push(ConversationBranch::new(id, name));
        id
    }

    /// Copies the history of `from` into a new branch and makes it current.
    pub fn fork_branch(&mut self, from: u32, name: impl Into<String>) -> Result<u32, DomainError> {
        let source = self
            .branch(from)
            .ok_or_else(|| DomainError::not_found(format!("Branch not found: {}", from)))?;

        let id = self.next_branch_id();
        let mut branch = ConversationBranch::new(id, name);
        branch.messages = source.messages.clone();
        branch.attachments = source.attachments.clone();
        branch.model = source.model;

        self.branches.push(branch);
        self.current_branch_id = id;
        Ok(id)
    }

    pub fn switch_branch(&mut self, id: u32) -> Result<(), DomainError> {
        if self.branch(id).is_none() {
            return Err(DomainError::not_found(format!("Branch not found: {}", id)));
        }
        self.current_branch_id = id;
        Ok(())
    }

    /// Removes a branch. The last remaining branch cannot be removed; removing
    /// the current branch selects the first remaining one.
    pub fn remove_branch(&mut self, id: u32) -> Result<ConversationBranch, DomainError> {
        let index = self
            .branches
            .iter()
            .position(|b| b.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("Branch not found: {}", id)))?;

        if self.branches.len() == 1 {
            return Err(DomainError::invalid_input(
                "Cannot remove the only branch of a thread",
            ));
        }

        let removed = self.branches.remove(index);
        if self.current_branch_id == id {
            self.current_branch_id = self.branches[0].id();
        }
        Ok(removed)
    }

    fn next_branch_id(&self) -> u32 {
        self.branches.iter().map(|b| b.id()).max().map_or(0, |max| max + 1)
    }
}

/// A reusable instruction template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPrompt {
    id: String,
    name: String,
    text: String,
    #[serde(default)]
    readonly: bool,
}

impl SystemPrompt {
    pub fn new(id: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
            readonly: false,
        }
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        if self.readonly {
            return Err(DomainError::invalid_input(format!(
                "System prompt '{}' is read-only",
                self.name
            )));
        }
        self.text = text.into();
        Ok(())
    }
}

fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_thread_has_current_branch() {
        let thread = ConversationThread::new("t1", "Debugging");
        assert_eq!(thread.branches().len(), 1);
        assert_eq!(thread.current_branch().id(), thread.current_branch_id());
        assert_eq!(thread.current_branch().name(), "main");
    }

    #[test]
    fn test_fork_copies_history_and_switches() {
        let mut thread = ConversationThread::new("t1", "Debugging");
        thread.push_message(ChatMessage::human("why does it crash?"));
        thread.push_message(ChatMessage::assistant("null pointer"));

        let forked = thread.fork_branch(0, "retry").unwrap();

        assert_eq!(thread.current_branch_id(), forked);
        assert_eq!(thread.current_branch().messages().len(), 2);

        thread.push_message(ChatMessage::human("try again"));
        assert_eq!(thread.branch(0).unwrap().messages().len(), 2);
        assert_eq!(thread.current_branch().messages().len(), 3);
    }

    #[test]
    fn test_switch_to_unknown_branch_is_rejected() {
        let mut thread = ConversationThread::new("t1", "Debugging");
        let err = thread.switch_branch(42).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(thread.current_branch_id(), 0);
    }

    #[test]
    fn test_remove_current_branch_selects_remaining() {
        let mut thread = ConversationThread::new("t1", "Debugging");
        let second = thread.add_branch("second");
        thread.switch_branch(second).unwrap();

        thread.remove_branch(second).unwrap();

        assert_eq!(thread.current_branch_id(), 0);
        assert!(thread.remove_branch(0).is_err(), "last branch must stay");
    }

    #[test]
    fn test_new_branch_id_follows_highest() {
        let mut thread = ConversationThread::new("t1", "Debugging");
        let a = thread.add_branch("a");
        let b = thread.add_branch("b");
        thread.remove_branch(a).unwrap();
        let c = thread.add_branch("c");
        assert!(c > b);
    }

    #[test]
    fn test_fork_keeps_attachments_and_model() {
        let mut thread = ConversationThread::new("t1", "Debugging").with_system_prompt("p1");
        thread.current_branch_mut().attach_file("/tmp/error.log");
        thread
            .current_branch_mut()
            .set_model(ModelIdentifier::Claude3Opus);

        let forked = thread.fork_branch(0, "retry").unwrap();

        let branch = thread.branch(forked).unwrap();
        assert_eq!(branch.attachments(), &[PathBuf::from("/tmp/error.log")]);
        assert_eq!(branch.model(), Some(ModelIdentifier::Claude3Opus));
        assert_eq!(thread.system_prompt_id(), Some("p1"));
    }

    #[test]
    fn test_thread_serde_keeps_branches() {
        let mut thread = ConversationThread::new("t1", "Debugging");
        let second = thread.fork_branch(0, "retry").unwrap();
        thread.branches[1] = ConversationBranch::new(second, "retry")
            .with_description("second attempt")
            .with_model(ModelIdentifier::Claude35Haiku);

        let json = serde_json::to_string(&thread).unwrap();
        let restored: ConversationThread = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.current_branch_id(), second);
        assert_eq!(restored.current_branch().description(), Some("second attempt"));
        assert_eq!(restored.current_branch().model(), Some(ModelIdentifier::Claude35Haiku));
    }

    fn thread_json(branches: &[ConversationBranch], current: u32) -> String {
        serde_json::json!({
            "id": "t1",
            "name": "Debugging",
            "branches": branches,
            "currentBranchId": current,
        })
        .to_string()
    }

    #[test]
    fn test_deserialize_rejects_unknown_current_branch() {
        let json = thread_json(&[ConversationBranch::new(0, "main")], 7);
        let err = serde_json::from_str::<ConversationThread>(&json).unwrap_err();
        assert!(err.to_string().contains("has no branch 7"));
    }

    #[test]
    fn test_deserialize_rejects_empty_branches() {
        let json = thread_json(&[], 0);
        let err = serde_json::from_str::<ConversationThread>(&json).unwrap_err();
        assert!(err.to_string().contains("has no branches"));
    }

    #[test]
    fn test_deserialize_rejects_duplicate_branch_ids() {
        let json = thread_json(
            &[ConversationBranch::new(0, "main"), ConversationBranch::new(0, "copy")],
            0,
        );
        assert!(serde_json::from_str::<ConversationThread>(&json).is_err());
    }

    #[test]
    fn test_readonly_system_prompt_rejects_edit() {
        let mut prompt = SystemPrompt::new("p1", "Reviewer", "Be terse.").readonly();
        assert!(prompt.set_text("Be verbose.").is_err());
        assert_eq!(prompt.text(), "Be terse.");

        let mut editable = SystemPrompt::new("p2", "Helper", "Be kind.");
        editable.set_text("Be precise.").unwrap();
        assert_eq!(editable.text(), "Be precise.");
    }
}
