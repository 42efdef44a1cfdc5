//! Validated identifiers, names and texts.
//!
//! Every constructor trims or normalizes its input and rejects values the
//! API must never store, so the rest of the crate works with valid data only.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

const USERNAME_MAX_LEN: usize = 150;
const EMAIL_MAX_LEN: usize = 254;
const NAME_MAX_LEN: usize = 150;
const MESSAGE_BODY_MAX_LEN: usize = 10000;

/// User identifier value object.
///
/// Holds a UUID in its canonical hyphenated lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier string (UUID)
    ///
    /// # Returns
    ///
    /// A Result containing the UserId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let uuid = Uuid::parse_str(&id).map_err(|_| ValueObjectError::UserIdInvalidFormat(id))?;
        Ok(Self::from_uuid(uuid))
    }

    /// Create a UserId from an already generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversation identifier value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    /// Create a new ConversationId.
    ///
    /// # Arguments
    ///
    /// * `id` - The conversation identifier string (UUID)
    ///
    /// # Returns
    ///
    /// A Result containing the ConversationId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConversationIdEmpty);
        }
        let uuid = Uuid::parse_str(&id)
            .map_err(|_| ValueObjectError::ConversationIdInvalidFormat(id))?;
        Ok(Self::from_uuid(uuid))
    }

    /// Create a ConversationId from an already generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Create a new MessageId from a UUID string.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::MessageIdEmpty);
        }
        let uuid =
            Uuid::parse_str(&id).map_err(|_| ValueObjectError::MessageIdInvalidFormat(id))?;
        Ok(Self::from_uuid(uuid))
    }

    /// Create a MessageId from an already generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login name of a user. Unique across the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// Surrounding whitespace is trimmed before validation.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = name.chars().count();
        if len > USERNAME_MAX_LEN {
            return Err(ValueObjectError::UsernameTooLong {
                max: USERNAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// E-mail address value object.
///
/// Only a shallow shape check is done (`local@domain`); deliverability is
/// not this type's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: String) -> Result<Self, ValueObjectError> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(ValueObjectError::EmailEmpty);
        }
        let len = email.chars().count();
        if len > EMAIL_MAX_LEN {
            return Err(ValueObjectError::EmailTooLong {
                max: EMAIL_MAX_LEN,
                actual: len,
            });
        }
        let well_formed = matches!(
            email.split_once('@'),
            Some((local, domain)) if !local.is_empty() && !domain.is_empty()
        );
        if !well_formed {
            return Err(ValueObjectError::EmailInvalidFormat(email));
        }
        Ok(Self(email))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First or last name of a user. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let name = name.trim().to_string();
        let len = name.chars().count();
        if len > NAME_MAX_LEN {
            return Err(ValueObjectError::NameTooLong {
                max: NAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Message body value object.
///
/// Represents the text of a message with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
    /// Create a new MessageBody.
    ///
    /// # Arguments
    ///
    /// * `body` - The message text
    ///
    /// # Returns
    ///
    /// A Result containing the MessageBody or an error if validation fails
    pub fn new(body: String) -> Result<Self, ValueObjectError> {
        if body.trim().is_empty() {
            return Err(ValueObjectError::MessageBodyEmpty);
        }
        let len = body.chars().count();
        if len > MESSAGE_BODY_MAX_LEN {
            return Err(ValueObjectError::MessageBodyTooLong {
                max: MESSAGE_BODY_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(body))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque bearer token identifying an authenticated user.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Result<Self, ValueObjectError> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(ValueObjectError::AccessTokenEmpty);
        }
        Ok(Self(token))
    }

    pub(super) fn from_generated(token: String) -> Self {
        Self(token)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// tokens must never end up in logs
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Milliseconds since the Unix epoch (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
