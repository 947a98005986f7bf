mod report;
pub(crate) mod summary;


pub(crate) use report::run_report;
