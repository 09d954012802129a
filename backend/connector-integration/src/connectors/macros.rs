use common_utils::errors::CustomResult;
use domain_types::errors;

/// Requests sent as a complete SOAP envelope
pub trait SoapXmlRequest {
    fn to_soap_xml(&self) -> CustomResult<String, errors::ConnectorError>;
}

/// Replies read out of a SOAP envelope
pub trait SoapXmlResponse: Sized {
    fn from_soap_xml(body: &[u8]) -> CustomResult<Self, errors::ConnectorError>;
}

/// Declares the connector struct with its amount converter, the router data wrapper the
/// request transformers consume, and the connector's helper functions.
macro_rules! create_all_prerequisites {
    (
        connector_name: $connector: ident,
        amount_converter: $amount_converter: ident,
        member_functions: {
            $($member_function: tt)*
        } $(,)?
    ) => {
        paste::paste! {
            #[derive(Clone)]
            pub struct $connector {
                amount_converter: &'static (dyn common_utils::types::AmountConvertor<
                    Output = <$amount_converter as common_utils::types::AmountConvertor>::Output,
                > + Sync),
            }

            impl $connector {
                pub const fn new() -> &'static Self {
                    &Self {
                        amount_converter: &$amount_converter,
                    }
                }

                pub(crate) fn convert_amount(
                    &self,
                    amount: common_utils::types::MinorUnit,
                    currency: common_enums::Currency,
                ) -> common_utils::errors::CustomResult<
                    <$amount_converter as common_utils::types::AmountConvertor>::Output,
                    domain_types::errors::ConnectorError,
                > {
                    error_stack::ResultExt::change_context(
                        self.amount_converter.convert(amount, currency),
                        domain_types::errors::ConnectorError::AmountConversionFailed,
                    )
                }

                $($member_function)*
            }

            /// A flow's router data together with the connector that is building its request
            pub struct [<$connector RouterData>]<'a, RD> {
                pub connector: &'a $connector,
                pub router_data: &'a RD,
            }
        }
    };
}

macro_rules! expand_fn_get_request_body {
    ($connector: ident, Json($curl_req: ty), $flow: ident, $request: ty) => {
        paste::paste! {
            fn get_request_body(
                &self,
                req: &domain_types::router_data_v2::RouterDataV2<$flow, $request>,
            ) -> common_utils::errors::CustomResult<Option<common_utils::request::RequestContent>, domain_types::errors::ConnectorError>
            {
                let connector_req = <$curl_req>::try_from([<$connector RouterData>] {
                    connector: self,
                    router_data: req,
                })?;
                Ok(Some(common_utils::request::RequestContent::Json(Box::new(connector_req))))
            }
        }
    };
    ($connector: ident, SoapXml($curl_req: ty), $flow: ident, $request: ty) => {
        paste::paste! {
            fn get_request_body(
                &self,
                req: &domain_types::router_data_v2::RouterDataV2<$flow, $request>,
            ) -> common_utils::errors::CustomResult<Option<common_utils::request::RequestContent>, domain_types::errors::ConnectorError>
            {
                let connector_req = <$curl_req>::try_from([<$connector RouterData>] {
                    connector: self,
                    router_data: req,
                })?;
                let envelope =
                    $crate::connectors::macros::SoapXmlRequest::to_soap_xml(&connector_req)?;
                Ok(Some(common_utils::request::RequestContent::RawBytes(
                    envelope.into_bytes(),
                )))
            }
        }
    };
}

macro_rules! expand_fn_handle_response {
    (Json($curl_res: ty), $flow: ident, $request: ty) => {
        fn handle_response_v2(
            &self,
            data: &domain_types::router_data_v2::RouterDataV2<$flow, $request>,
            res: domain_types::router_response_types::Response,
        ) -> common_utils::errors::CustomResult<domain_types::router_response_types::ProcessorReply, domain_types::errors::ConnectorError>
        {
            let response: $curl_res = error_stack::ResultExt::change_context(
                common_utils::ext_traits::BytesExt::parse_struct(
                    &res.response,
                    stringify!($curl_res),
                ),
                domain_types::errors::ConnectorError::ResponseDeserializationFailed,
            )?;
            domain_types::router_response_types::ProcessorReply::try_from(
                $crate::types::ResponseRouterData {
                    response,
                    router_data: data,
                    http_code: res.status_code,
                },
            )
        }
    };
    (SoapXml($curl_res: ty), $flow: ident, $request: ty) => {
        fn handle_response_v2(
            &self,
            data: &domain_types::router_data_v2::RouterDataV2<$flow, $request>,
            res: domain_types::router_response_types::Response,
        ) -> common_utils::errors::CustomResult<domain_types::router_response_types::ProcessorReply, domain_types::errors::ConnectorError>
        {
            let response = <$curl_res as $crate::connectors::macros::SoapXmlResponse>::from_soap_xml(
                &res.response,
            )?;
            domain_types::router_response_types::ProcessorReply::try_from(
                $crate::types::ResponseRouterData {
                    response,
                    router_data: data,
                    http_code: res.status_code,
                },
            )
        }
    };
}

macro_rules! expand_default_functions {
    (get_content_type) => {
        fn get_content_type(&self) -> &'static str {
            interfaces::api::ConnectorCommon::common_get_content_type(self)
        }
    };
    (get_error_response_v2) => {
        fn get_error_response_v2(
            &self,
            res: domain_types::router_response_types::Response,
        ) -> common_utils::errors::CustomResult<domain_types::router_data::ErrorResponse, domain_types::errors::ConnectorError> {
            interfaces::api::ConnectorCommon::build_error_response(self, res)
        }
    };
}

/// Expands one `ConnectorIntegrationV2` impl for a flow. `curl_request` names the body
/// type and how it is sent (`Json` or `SoapXml`), `curl_response` the reply type and how
/// it is read. Headers and url come through `other_functions`.
macro_rules! macro_connector_implementation {
    (
        connector_default_implementations: [$($function_name: ident),* $(,)?],
        connector: $connector: ident,
        curl_request: $content_type: ident($curl_req: ty),
        curl_response: $response_format: ident($curl_res: ty),
        flow_name: $flow_name: ident,
        flow_request: $flow_request: ty,
        http_method: $http_method: ident,
        other_functions: {
            $($function_def: tt)*
        }
    ) => {
        impl interfaces::connector_integration_v2::ConnectorIntegrationV2<$flow_name, $flow_request>
            for $connector
        {
            fn get_http_method(&self) -> common_utils::request::Method {
                common_utils::request::Method::$http_method
            }

            $crate::connectors::macros::expand_fn_get_request_body!(
                $connector,
                $content_type($curl_req),
                $flow_name,
                $flow_request
            );

            $crate::connectors::macros::expand_fn_handle_response!(
                $response_format($curl_res),
                $flow_name,
                $flow_request
            );

            $($crate::connectors::macros::expand_default_functions!($function_name);)*

            $($function_def)*
        }
    };
}

pub(crate) use create_all_prerequisites;
pub(crate) use expand_default_functions;
pub(crate) use expand_fn_get_request_body;
pub(crate) use expand_fn_handle_response;
pub(crate) use macro_connector_implementation;
