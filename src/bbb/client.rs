use std::time::Duration;

use reqwest::{Client, Url};

use crate::bbb::{checksum, ApiCall, QueryParams};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{CreateMeeting, JoinMeeting};

const SUCCESS_MARKER: &str = "<returncode>SUCCESS</returncode>";
const DUPLICATE_MARKER: &str = "duplicateWarning";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of a `create` call, read from the XML body by substring only.
///
/// The server reports an already-running meeting with `duplicateWarning`,
/// which is the normal path for the second joiner of a live room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyRunning,
    Rejected { body: String },
}

impl CreateOutcome {
    pub fn from_body(body: String) -> Self {
        if body.contains(SUCCESS_MARKER) {
            CreateOutcome::Created
        } else if body.contains(DUPLICATE_MARKER) {
            CreateOutcome::AlreadyRunning
        } else {
            CreateOutcome::Rejected { body }
        }
    }
}

/// Client for a BigBlueButton-compatible API root
#[derive(Clone)]
pub struct BbbClient {
    client: Client,
    base_url: Url,
    secret: String,
}

impl BbbClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.bbb_url)
            .map_err(|e| AppError::InternalError(format!("Invalid BBB_URL: {}", e)))?;

        let client = Client::builder()
            .timeout(config.bbb_timeout())
            .connect_timeout(CONNECT_TIMEOUT.min(config.bbb_timeout()))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            secret: config.bbb_secret.clone(),
        })
    }

    /// `<base><call>?<query>&checksum=<sha1>`.
    ///
    /// The checksum is computed over the query exactly as the URL will carry
    /// it: URL parsers (ours and browsers') re-escape some characters that
    /// encodeURIComponent leaves alone, such as `'`.
    pub fn signed_url(&self, call: ApiCall, params: &QueryParams) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", self.base_url.path(), call.as_str());
        url.set_path(&path);
        url.set_query(Some(&params.to_query_string()));

        let signed_query = url.query().unwrap_or_default().to_string();
        let checksum = checksum(call.as_str(), &signed_query, &self.secret);
        url.set_query(Some(&format!("{}&checksum={}", signed_query, checksum)));
        url
    }

    /// GET the signed `create` URL and classify the response
    pub async fn create_meeting(&self, meeting: &CreateMeeting) -> Result<CreateOutcome> {
        let url = self.signed_url(ApiCall::Create, &meeting.to_params());

        tracing::debug!(meeting_id = %meeting.meeting_id, "Calling BBB create");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                meeting_id = %meeting.meeting_id,
                status = status.as_u16(),
                response = %body,
                "BBB create returned non-success status"
            );
            return Err(AppError::Transport(format!(
                "conferencing server returned HTTP {}",
                status.as_u16()
            )));
        }

        Ok(CreateOutcome::from_body(body))
    }

    /// Signed join URL for a browser to open. Never fetched here: the server
    /// sets up the user's session when the browser itself loads it.
    pub fn join_url(&self, join: &JoinMeeting) -> String {
        self.signed_url(ApiCall::Join, &join.to_params()).into()
    }

    /// Unauthenticated GET of the API root, which answers with a version document
    pub async fn probe(&self) -> Result<bool> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let body = response.text().await?;
        Ok(body.contains(SUCCESS_MARKER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JoinRole, MeetingIdentity};
    use pretty_assertions::assert_eq;

    fn test_config() -> Config {
        Config {
            server_host: "localhost".to_string(),
            server_port: 8080,
            bbb_url: "https://bbb.example.com/bigbluebutton/api/".to_string(),
            bbb_secret: "test-secret".to_string(),
            bbb_timeout_seconds: 10,
        }
    }

    #[test]
    fn test_success_marker() {
        let outcome = CreateOutcome::from_body(
            "<response><returncode>SUCCESS</returncode><meetingID>x</meetingID></response>"
                .to_string(),
        );
        assert_eq!(outcome, CreateOutcome::Created);
    }

    #[test]
    fn test_duplicate_warning_marker() {
        let outcome = CreateOutcome::from_body(
            "<response><returncode>FAILED</returncode><messageKey>duplicateWarning</messageKey></response>"
                .to_string(),
        );
        assert_eq!(outcome, CreateOutcome::AlreadyRunning);
    }

    #[test]
    fn test_other_failures_keep_body() {
        let body =
            "<response><returncode>FAILED</returncode><messageKey>genericError</messageKey></response>";
        let outcome = CreateOutcome::from_body(body.to_string());

        assert_eq!(
            outcome,
            CreateOutcome::Rejected {
                body: body.to_string()
            }
        );
    }

    #[test]
    fn test_signed_url_layout() {
        let client = BbbClient::new(&test_config()).expect("Should build client");
        let params = QueryParams::new().push("meetingID", "m1");
        let url = client.signed_url(ApiCall::Create, &params);

        let expected_checksum = checksum("create", "meetingID=m1", "test-secret");
        assert_eq!(
            url.as_str(),
            format!(
                "https://bbb.example.com/bigbluebutton/api/create?meetingID=m1&checksum={}",
                expected_checksum
            )
        );
    }

    #[test]
    fn test_join_url_checksum_differs_from_create() {
        let client = BbbClient::new(&test_config()).expect("Should build client");
        let meeting_id = MeetingIdentity::for_course("42");

        let create_url = client.signed_url(
            ApiCall::Create,
            &CreateMeeting::new(meeting_id.clone(), "Intro - Live Session").to_params(),
        );
        let join_url = client.join_url(&JoinMeeting {
            meeting_id,
            full_name: "Jordan Lee".to_string(),
            role: JoinRole::Moderator,
        });

        let create_checksum = create_url.as_str().rsplit("checksum=").next();
        let join_checksum = join_url.rsplit("checksum=").next();
        assert_ne!(create_checksum, join_checksum);
        assert!(join_url.starts_with("https://bbb.example.com/bigbluebutton/api/join?"));
    }

    #[test]
    fn test_apostrophe_signed_as_sent() {
        let client = BbbClient::new(&test_config()).expect("Should build client");
        let join_url = client.join_url(&JoinMeeting {
            meeting_id: MeetingIdentity::for_course("42"),
            full_name: "Pat O'Brien".to_string(),
            role: JoinRole::Moderator,
        });

        let query = join_url.split_once('?').map(|(_, q)| q).unwrap_or_default();
        let (signed, sent_checksum) = query
            .rsplit_once("&checksum=")
            .expect("Join URL should carry a checksum");

        assert!(signed.contains("fullName=Pat%20O%27Brien"));
        assert_eq!(sent_checksum, checksum("join", signed, "test-secret"));

        // A browser re-parsing the URL must see the same bytes
        let reparsed = Url::parse(&join_url).expect("Join URL should parse");
        assert_eq!(reparsed.as_str(), join_url);
    }
}
