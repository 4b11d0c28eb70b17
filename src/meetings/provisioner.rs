use chrono::Utc;

use crate::bbb::{BbbClient, CreateOutcome};
use crate::error::{AppError, Result};
use crate::models::{
    AdhocSessionRequest, CreateMeeting, JoinMeeting, JoinRole, JoinSessionRequest,
    JoinSessionResponse, MeetingIdentity,
};

/// Creates (or reuses) a room and derives a signed join URL.
///
/// Stateless between calls: concurrent joins for one course are safe because
/// `create` is idempotent server side and each join URL is signed separately.
pub struct MeetingProvisioner {
    bbb: BbbClient,
}

impl MeetingProvisioner {
    pub fn new(bbb: BbbClient) -> Self {
        Self { bbb }
    }

    pub fn bbb(&self) -> &BbbClient {
        &self.bbb
    }

    /// Join the persistent live-session room of a course
    pub async fn join_course_session(
        &self,
        request: &JoinSessionRequest,
    ) -> Result<JoinSessionResponse> {
        let session = request.validate()?;
        let meeting_id = session.meeting_id();

        // Every joiner gets the moderator password. Whether only the course
        // instructor should moderate is still undecided.
        self.provision(
            CreateMeeting::new(meeting_id, session.meeting_name()),
            session.user_name,
            JoinRole::Moderator,
        )
        .await
    }

    /// One-off room named after `roomName`, unique per request
    pub async fn start_adhoc_session(
        &self,
        request: &AdhocSessionRequest,
    ) -> Result<JoinSessionResponse> {
        let session = request.validate()?;
        let meeting_id = MeetingIdentity::adhoc(&session.room_name, Utc::now().timestamp_millis());

        self.provision(
            CreateMeeting::new(meeting_id, session.room_name),
            session.user_name,
            session.role,
        )
        .await
    }

    async fn provision(
        &self,
        create: CreateMeeting,
        full_name: String,
        role: JoinRole,
    ) -> Result<JoinSessionResponse> {
        let meeting_id = create.meeting_id.clone();

        match self.bbb.create_meeting(&create).await {
            Ok(CreateOutcome::Created) => {
                tracing::info!(meeting_id = %meeting_id, "Meeting created");
            }
            Ok(CreateOutcome::AlreadyRunning) => {
                tracing::info!(meeting_id = %meeting_id, "Meeting already running, reusing");
            }
            Ok(CreateOutcome::Rejected { body }) => {
                tracing::error!(meeting_id = %meeting_id, response = %body, "BBB create failed");
                return Err(AppError::CreateFailed { details: body });
            }
            Err(e) => {
                tracing::error!(meeting_id = %meeting_id, error = %e, "BBB create request failed");
                return Err(e);
            }
        }

        let join_url = self.bbb.join_url(&JoinMeeting {
            meeting_id: meeting_id.clone(),
            full_name,
            role,
        });

        tracing::debug!(meeting_id = %meeting_id, ?role, "Join URL derived");

        Ok(JoinSessionResponse::new(join_url, meeting_id))
    }
}
