pub mod agent;
pub mod response;
pub mod resume;
pub mod upload;

pub use agent::{format_agent_name, Agent, Tone};
pub use response::{ResumeListResponse, SearchRequest, SearchResponse, UploadAck};
pub use resume::{DatabaseStatus, PreviewUrl, ResumeFile, SearchResult};
pub use upload::{JobDescription, UploadFile};
