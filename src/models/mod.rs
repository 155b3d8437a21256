pub mod hire_job;
pub mod job_type;
pub mod order;
pub mod watermark;

pub use hire_job::{Address, DeliveryType, HireJobDocument, OrderLineItem, OrderLineItems, Orders};
pub use job_type::JobType;
pub use order::{BillingAddress, OrderProduct, OrderQuery, OrderStatus, ShippingAddress, SourceOrder};
pub use watermark::WatermarkRecord;
