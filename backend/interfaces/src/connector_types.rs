use domain_types::{
    connector_flow,
    router_request_types::{
        PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsVerifyData, RefundsData,
    },
};

use crate::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};

/// The full operation contract every processor adapter satisfies
pub trait GatewayAdapter:
    ConnectorCommon
    + ValidationTrait
    + PaymentPurchaseV2
    + PaymentAuthorizeV2
    + PaymentCapture
    + RefundV2
    + PaymentVoidV2
    + PaymentTokenV2
    + PaymentVerifyV2
{
}

pub type BoxedConnector = Box<&'static (dyn GatewayAdapter + Sync)>;

/// Optional operations. A connector that leaves these `false` still carries default
/// integrations for the flows, they are simply never called.
pub trait ValidationTrait {
    fn supports_store(&self) -> bool {
        false
    }

    fn supports_verify(&self) -> bool {
        false
    }
}

pub trait PaymentPurchaseV2:
    ConnectorIntegrationV2<connector_flow::Purchase, PaymentsAuthorizeData>
{
}

pub trait PaymentAuthorizeV2:
    ConnectorIntegrationV2<connector_flow::Authorize, PaymentsAuthorizeData>
{
}

pub trait PaymentCapture: ConnectorIntegrationV2<connector_flow::Capture, PaymentsCaptureData> {}

pub trait RefundV2: ConnectorIntegrationV2<connector_flow::Refund, RefundsData> {}

pub trait PaymentVoidV2: ConnectorIntegrationV2<connector_flow::Void, PaymentVoidData> {}

pub trait PaymentTokenV2:
    ConnectorIntegrationV2<connector_flow::Store, PaymentMethodTokenizationData>
{
}

pub trait PaymentVerifyV2: ConnectorIntegrationV2<connector_flow::Verify, PaymentsVerifyData> {}
