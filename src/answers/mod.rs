//! Answer generation flows.
//!
//! Two flows, both thin orchestrations over the model provider: the
//! interview flow (audio snippet in, quick + full spoken answers out) and
//! the vision flow (screenshot in, solved question out).

pub mod interview;
pub mod prompt;
pub mod vision;

pub use interview::{process_interview, ContextSections, InterviewAnswer, InterviewRequest};
pub use vision::{answer_from_image, parse_options, VisionAnswer, VisionQuestion};
