use domain_types::types::ConnectorEnum;
use interfaces::connector_types::BoxedConnector;

use crate::connectors;

/// A parsed processor reply with the router data of the flow that produced it
pub struct ResponseRouterData<'a, Response, RouterData> {
    pub response: Response,
    pub router_data: &'a RouterData,
    pub http_code: u16,
}

#[derive(Clone)]
pub struct ConnectorData {
    pub connector: BoxedConnector,
    pub connector_name: ConnectorEnum,
}

impl ConnectorData {
    pub fn get_connector_by_name(connector_name: &ConnectorEnum) -> Self {
        let connector = Self::convert_connector(*connector_name);
        Self {
            connector,
            connector_name: *connector_name,
        }
    }

    fn convert_connector(connector_name: ConnectorEnum) -> BoxedConnector {
        match connector_name {
            ConnectorEnum::Commercehub => Box::new(connectors::CommerceHub::new()),
            ConnectorEnum::Borgun => Box::new(connectors::Borgun::new()),
        }
    }
}
