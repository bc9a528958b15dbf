//! Page utilities: date display, busy/idle toggling, alerts.

pub mod alert;
pub mod date;
pub mod loading;

pub use alert::{show_alert, AlertLevel, AlertSink, TracingAlertSink, UnknownAlertLevel};
pub use date::{format_date, format_date_in, format_date_time, format_date_time_in};
pub use loading::{hide_loading, show_loading, Button, Control, LoadingGuard};
