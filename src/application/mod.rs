pub mod dropdown;
pub mod dto;
pub mod monthly;
pub mod payment_flow;
pub mod popup_watcher;

pub use dropdown::{DropdownChange, DropdownGroup};
pub use dto::{ApprovalRedirect, ChartPoint};
pub use monthly::{MonthlySeries, MonthlyTotal};
pub use payment_flow::PaymentFlow;
pub use popup_watcher::PopupWatcher;
