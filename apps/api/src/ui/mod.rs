// Browser-facing page. Decides how typed extraction and query results are shown.

pub mod handlers;
pub mod page;
