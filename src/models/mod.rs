pub mod meeting;

pub use meeting::{
    AdhocSession,
    AdhocSessionRequest,
    CourseSession,
    CreateMeeting,
    JoinMeeting,
    JoinRole,
    JoinSessionRequest,
    JoinSessionResponse,
    MeetingIdentity,
};
