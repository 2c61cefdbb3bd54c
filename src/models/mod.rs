pub mod month_report;
pub mod status;
pub mod work_session;
