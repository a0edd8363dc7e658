//! Bookkeeping for the views a tool can be shown in.

pub mod host;
pub mod registry;
pub mod tabs;
#[cfg(test)]
pub(crate) mod testing;

pub use host::{
    OpenRequest, OpenRequestSink, TabHost, TabOutcome, WindowHost, WindowSpec,
    TOOL_WINDOW_MIN_SIZE,
};
pub use registry::{OpenOutcome, ViewRegistry};
pub use tabs::{Tab, TabId, TabStrip, PRIMARY_HOST_LABEL, PRIMARY_TAB_INDEX};
