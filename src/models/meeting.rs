use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bbb::QueryParams;
use crate::error::{AppError, Result};

pub const COURSE_MEETING_PREFIX: &str = "peerloop-course-";
pub const ADHOC_MEETING_PREFIX: &str = "peerloop-";

const ATTENDEE_PASSWORD: &str = "attendee";
const MODERATOR_PASSWORD: &str = "moderator";

/// Conferencing room identity. Repeated requests for the same course map to
/// the same identity, so joiners land in one room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeetingIdentity(String);

impl MeetingIdentity {
    /// Depends on the course id only, never on course or user names
    pub fn for_course(course_id: &str) -> Self {
        Self(format!("{}{}", COURSE_MEETING_PREFIX, course_id))
    }

    /// One-off room: `peerloop-<slug>-<unix millis>`
    pub fn adhoc(room_name: &str, created_at_millis: i64) -> Self {
        Self(format!(
            "{}{}-{}",
            ADHOC_MEETING_PREFIX,
            slugify(room_name),
            created_at_millis
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MeetingIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, each whitespace run collapsed to a single `-`
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    slug
}

/// Role a joiner gets inside the room, selected by the join password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRole {
    Moderator,
    Attendee,
}

impl JoinRole {
    pub fn password(&self) -> &'static str {
        match self {
            JoinRole::Moderator => MODERATOR_PASSWORD,
            JoinRole::Attendee => ATTENDEE_PASSWORD,
        }
    }
}

/// Parameters of the `create` call
#[derive(Debug, Clone)]
pub struct CreateMeeting {
    pub meeting_id: MeetingIdentity,
    pub name: String,
}

impl CreateMeeting {
    pub fn new(meeting_id: MeetingIdentity, name: impl Into<String>) -> Self {
        Self {
            meeting_id,
            name: name.into(),
        }
    }

    pub fn welcome(&self) -> String {
        format!("Welcome to {}!", self.name)
    }

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("meetingID", self.meeting_id.as_str())
            .push("name", self.name.as_str())
            .push("attendeePW", ATTENDEE_PASSWORD)
            .push("moderatorPW", MODERATOR_PASSWORD)
            .push("welcome", self.welcome())
            .push("record", "false")
    }
}

/// Parameters of the `join` call
#[derive(Debug, Clone)]
pub struct JoinMeeting {
    pub meeting_id: MeetingIdentity,
    pub full_name: String,
    pub role: JoinRole,
}

impl JoinMeeting {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("meetingID", self.meeting_id.as_str())
            .push("fullName", self.full_name.as_str())
            .push("password", self.role.password())
            .push("redirect", "true")
    }
}

/// Body of a course session join request.
/// Fields are kept as raw JSON so absent, null, empty and zero values are
/// all reported as one validation failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionRequest {
    #[serde(default)]
    pub course_id: Option<Value>,
    #[serde(default)]
    pub course_name: Option<Value>,
    #[serde(default)]
    pub user_name: Option<Value>,
}

/// A join request with all required fields present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSession {
    pub course_id: String,
    pub course_name: String,
    pub user_name: String,
}

impl JoinSessionRequest {
    pub fn validate(&self) -> Result<CourseSession> {
        match (
            required_text(&self.course_id),
            required_text(&self.course_name),
            required_text(&self.user_name),
        ) {
            (Some(course_id), Some(course_name), Some(user_name)) => Ok(CourseSession {
                course_id,
                course_name,
                user_name,
            }),
            _ => Err(AppError::BadRequest(
                "Missing required fields: courseId, courseName, userName".to_string(),
            )),
        }
    }
}

impl CourseSession {
    pub fn meeting_id(&self) -> MeetingIdentity {
        MeetingIdentity::for_course(&self.course_id)
    }

    pub fn meeting_name(&self) -> String {
        format!("{} - Live Session", self.course_name)
    }
}

/// Body of an ad-hoc session request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdhocSessionRequest {
    #[serde(default)]
    pub room_name: Option<Value>,
    #[serde(default)]
    pub user_name: Option<Value>,
    #[serde(default)]
    pub moderator: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdhocSession {
    pub room_name: String,
    pub user_name: String,
    pub role: JoinRole,
}

impl AdhocSessionRequest {
    pub fn validate(&self) -> Result<AdhocSession> {
        match (
            required_text(&self.room_name),
            required_text(&self.user_name),
        ) {
            (Some(room_name), Some(user_name)) => Ok(AdhocSession {
                room_name,
                user_name,
                role: if self.moderator.unwrap_or(true) {
                    JoinRole::Moderator
                } else {
                    JoinRole::Attendee
                },
            }),
            _ => Err(AppError::BadRequest(
                "Missing required fields: roomName, userName".to_string(),
            )),
        }
    }
}

/// Text form of a required field, or `None` for absent/null/false/""/0.
/// Arrays and objects are rejected as well.
fn required_text(value: &Option<Value>) -> Option<String> {
    match value.as_ref()? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i != 0).then(|| i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f == 0.0 || f.is_nan() {
                    None
                } else if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 {
                    Some(format!("{}", f as i64))
                } else {
                    Some(f.to_string())
                }
            }
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Successful provisioning result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionResponse {
    pub success: bool,
    pub join_url: String,
    pub meeting_id: String,
}

impl JoinSessionResponse {
    pub fn new(join_url: String, meeting_id: MeetingIdentity) -> Self {
        Self {
            success: true,
            join_url,
            meeting_id: meeting_id.into_string(),
        }
    }
}
