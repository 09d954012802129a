use std::marker::PhantomData;

use crate::{router_data::ConnectorAuthType, types::GatewayFlowData};

/// Everything an adapter needs to build one flow's request
#[derive(Debug, Clone)]
pub struct RouterDataV2<Flow, Req> {
    pub flow: PhantomData<Flow>,
    pub resource_common_data: GatewayFlowData,
    pub connector_auth_type: ConnectorAuthType,
    pub request: Req,
}

impl<Flow, Req> RouterDataV2<Flow, Req> {
    pub fn new(
        resource_common_data: GatewayFlowData,
        connector_auth_type: ConnectorAuthType,
        request: Req,
    ) -> Self {
        Self {
            flow: PhantomData,
            resource_common_data,
            connector_auth_type,
            request,
        }
    }
}
