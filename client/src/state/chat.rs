//! Chat transcript state for the project sidebar.
//!
//! DESIGN
//! ======
//! The transcript is append-only and lives for the page lifetime. At most
//! one send is in flight; the user message is appended before the request
//! so the transcript order always matches what the user typed.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,
    /// Synthetic assistant message standing in for a failed reply.
    pub is_error: bool,
}

/// State for the chat panel of one project.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub loading: bool,
    pub error: Option<String>,
    /// Project this transcript belongs to.
    pub project_id: Option<String>,
    /// Whether chat initiation has been requested for `project_id`.
    pub initiated: bool,
}

impl ChatState {
    /// Reset the transcript when the panel switches to another project.
    pub fn switch_project(&mut self, project_id: &str) {
        if self.project_id.as_deref() == Some(project_id) {
            return;
        }
        *self = Self { project_id: Some(project_id.to_owned()), ..Self::default() };
    }

    /// Claim the one chat initiation call for the current project.
    pub fn begin_initiation(&mut self) -> bool {
        if self.initiated || self.project_id.is_none() {
            return false;
        }
        self.initiated = true;
        true
    }

    /// Append the greeting returned by chat initiation.
    pub fn receive_greeting(&mut self, reply: String, timestamp: f64) {
        if !reply.trim().is_empty() {
            self.push(Role::Assistant, reply, timestamp, false);
        }
    }

    /// Append the user's message and mark a send in flight.
    ///
    /// Returns the trimmed text to send, or `None` when the input is blank
    /// or another send is still pending.
    pub fn begin_send(&mut self, input: &str, timestamp: f64) -> Option<String> {
        let text = input.trim();
        if text.is_empty() || self.loading {
            return None;
        }
        self.error = None;
        self.loading = true;
        self.push(Role::User, text.to_owned(), timestamp, false);
        Some(text.to_owned())
    }

    /// Append the assistant reply and clear the in-flight flag.
    pub fn receive_reply(&mut self, reply: String, timestamp: f64) {
        self.loading = false;
        self.push(Role::Assistant, reply, timestamp, false);
    }

    /// Surface a failed send as a banner and a synthetic assistant message.
    pub fn fail(&mut self, error: &str, timestamp: f64) {
        self.loading = false;
        self.error = Some(format!("Message failed: {error}"));
        self.push(Role::Assistant, format!("Sorry, something went wrong: {error}"), timestamp, true);
    }

    fn push(&mut self, role: Role, content: String, timestamp: f64, is_error: bool) {
        self.messages.push(ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            timestamp,
            is_error,
        });
    }
}
