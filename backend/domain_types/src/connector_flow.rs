#[derive(Debug, Clone)]
pub struct Purchase;

#[derive(Debug, Clone)]
pub struct Authorize;

#[derive(Debug, Clone)]
pub struct Capture;

#[derive(Debug, Clone)]
pub struct Refund;

#[derive(Debug, Clone)]
pub struct Void;

#[derive(Debug, Clone)]
pub struct Store;

#[derive(Debug, Clone)]
pub struct Verify;

#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FlowName {
    Purchase,
    Authorize,
    Capture,
    Refund,
    Void,
    Store,
    Verify,
}

/// Ties a flow marker to its name for logging and error reporting
pub trait FlowMarker {
    const NAME: FlowName;
}

impl FlowMarker for Purchase {
    const NAME: FlowName = FlowName::Purchase;
}

impl FlowMarker for Authorize {
    const NAME: FlowName = FlowName::Authorize;
}

impl FlowMarker for Capture {
    const NAME: FlowName = FlowName::Capture;
}

impl FlowMarker for Refund {
    const NAME: FlowName = FlowName::Refund;
}

impl FlowMarker for Void {
    const NAME: FlowName = FlowName::Void;
}

impl FlowMarker for Store {
    const NAME: FlowName = FlowName::Store;
}

impl FlowMarker for Verify {
    const NAME: FlowName = FlowName::Verify;
}
