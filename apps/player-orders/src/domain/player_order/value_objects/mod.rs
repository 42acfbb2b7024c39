//! Player order value objects.

mod order_brief;
mod order_status;
mod order_template;
mod publication;

pub use order_brief::{MAX_TITLE_CHARS, OrderBrief};
pub use order_status::PlayerOrderStatus;
pub use order_template::{PlayerOrderTemplate, TemplateCode};
pub use publication::Publication;
