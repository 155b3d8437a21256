pub mod message_parser;
pub mod reporter;
pub mod transformer;
pub mod validator;
pub mod watermark_store;
pub mod xml_writer;

pub use message_parser::{extract_dates, split_message, HireDates, SplitMessage};
pub use reporter::{Reporter, TracingReporter};
pub use transformer::{to_hire_job, TransformInput};
pub use validator::validate;
pub use watermark_store::WatermarkStore;
