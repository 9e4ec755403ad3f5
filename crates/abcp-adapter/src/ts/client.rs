/*
[INPUT]:  Receipt, picking, complaint, cart and position arguments
[OUTPUT]: JSON responses from the client-side trade stock endpoints
[POS]:    ts client namespace - goods flow as the customer sees it
[UPDATE]: When the vendor extends the client trade stock surface
*/

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use crate::http::client::AbcpClient;
use crate::http::dates::DateTimeArg;
use crate::http::error::{AbcpError, Result};
use crate::http::params::{Params, check_fields, check_flags, check_limit};
use crate::types::requests::{
    AgreementsFilter, ComplaintPositionsFilter, CustomerComplaintsFilter,
    GoodReceiptsFilter, OrderPickingsFilter, TsOrdersFilter, TsPositionsFilter,
};

/// Client-side trade stock methods.
pub struct TsClient<'a> {
    client: &'a AbcpClient,
}

impl<'a> TsClient<'a> {
    pub(crate) fn new(client: &'a AbcpClient) -> Self {
        Self { client }
    }

    pub fn good_receipts(&self) -> GoodReceipts<'a> {
        GoodReceipts { client: self.client }
    }

    pub fn order_pickings(&self) -> OrderPickings<'a> {
        OrderPickings { client: self.client }
    }

    pub fn customer_complaints(&self) -> CustomerComplaints<'a> {
        CustomerComplaints { client: self.client }
    }

    pub fn orders(&self) -> Orders<'a> {
        Orders { client: self.client }
    }

    pub fn cart(&self) -> Cart<'a> {
        Cart { client: self.client }
    }

    pub fn positions(&self) -> Positions<'a> {
        Positions { client: self.client }
    }

    pub fn agreements(&self) -> Agreements<'a> {
        Agreements { client: self.client }
    }
}

/// Incoming goods receipts.
pub struct GoodReceipts<'a> {
    client: &'a AbcpClient,
}

impl GoodReceipts<'_> {
    /// POST ts/goodReceipts/create
    ///
    /// The supplier shipment date travels in the `cp` date format.
    pub async fn create(
        &self,
        code: &str,
        positions: &[Value],
        sup_number: Option<&str>,
        sup_shipment_date: Option<DateTimeArg>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("code", code);
        params.push_objects("positions", positions);
        params.push_opt("supNumber", sup_number);
        params.push_opt(
            "supShipmentDate",
            sup_shipment_date.as_ref().map(|d| d.to_cp()),
        );
        self.client.post_form("ts/goodReceipts/create", params).await
    }

    /// GET ts/goodReceipts/get
    pub async fn get(&self, filter: &GoodReceiptsFilter) -> Result<Value> {
        self.client.get("ts/goodReceipts/get", filter.params()?).await
    }

    /// GET ts/goodReceipts/getPositions
    pub async fn get_positions(
        &self,
        op_id: i64,
        limit: Option<i64>,
        skip: Option<i64>,
        output: Option<&str>,
        product_id: Option<i64>,
        auto: Option<&str>,
    ) -> Result<Value> {
        check_limit(limit)?;
        check_flags("output", output, "e")?;
        if let Some(a) = auto {
            if a.len() < 3 {
                return Err(AbcpError::wrong_parameter(
                    "auto",
                    "needs at least three characters",
                ));
            }
        }
        let mut params = Params::new();
        params.push("opId", op_id);
        params.push_opt("limit", limit);
        params.push_opt("skip", skip);
        params.push_opt("output", output);
        params.push_opt("productId", product_id);
        params.push_opt("auto", auto);
        self.client.get("ts/goodReceipts/getPositions", params).await
    }
}

/// Order picking operations.
pub struct OrderPickings<'a> {
    client: &'a AbcpClient,
}

impl OrderPickings<'_> {
    /// GET ts/orderPickings/get
    pub async fn get(&self, filter: &OrderPickingsFilter) -> Result<Value> {
        self.client.get("ts/orderPickings/get", filter.params()?).await
    }

    /// GET ts/orderPickings/getGoods
    pub async fn get_positions(
        &self,
        op_id: i64,
        limit: Option<i64>,
        skip: Option<i64>,
        output: Option<&str>,
        product_id: Option<i64>,
        item_id: Option<i64>,
        ignore_canceled: Option<bool>,
    ) -> Result<Value> {
        check_limit(limit)?;
        check_flags("output", output, "oe")?;
        let mut params = Params::new();
        params.push("opId", op_id);
        params.push_opt("limit", limit);
        params.push_opt("skip", skip);
        params.push_opt("output", output);
        params.push_opt("productId", product_id);
        params.push_opt("itemId", item_id);
        // Sent only when enabled; the endpoint treats presence as the flag.
        if ignore_canceled == Some(true) {
            params.push("ignoreCanceled", "1");
        }
        self.client.get("ts/orderPickings/getGoods", params).await
    }
}

/// Customer complaints (returns, exchanges, warranty claims).
pub struct CustomerComplaints<'a> {
    client: &'a AbcpClient,
}

impl CustomerComplaints<'_> {
    /// GET ts/customerComplaints/get
    pub async fn get(&self, filter: &CustomerComplaintsFilter) -> Result<Value> {
        let params = filter.params(&["orderPicking", "agreement", "posInfo"])?;
        self.client.get("ts/customerComplaints/get", params).await
    }

    /// GET ts/customerComplaints/getPositions
    pub async fn get_positions(&self, filter: &ComplaintPositionsFilter) -> Result<Value> {
        let params = filter.params(&[
            "product",
            "orderPickingInfo",
            "operationInfo",
            "supplierReturnPos",
        ])?;
        self.client
            .get("ts/customerComplaints/getPositions", params)
            .await
    }

    /// POST ts/customerComplaints/create
    pub async fn create(&self, order_picking_id: i64, positions: &[Value]) -> Result<Value> {
        let mut params = Params::new();
        params.push("orderPickingId", order_picking_id);
        params.push_objects("positions", positions);
        self.client
            .post_form("ts/customerComplaints/create", params)
            .await
    }

    /// POST ts/customerComplaints/createPositionMultiple
    ///
    /// The custom complaint file travels base64 encoded.
    pub async fn create_position_multiple(
        &self,
        positions: &[Value],
        customer_complaint_id: Option<i64>,
        customer_complaint: Option<&str>,
        custom_complaint_file: Option<&[u8]>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_objects("positions", positions);
        params.push_opt("customerComplaintId", customer_complaint_id);
        params.push_opt("customerComplaint", customer_complaint);
        params.push_opt("customComplaintFile", custom_complaint_file.map(|f| BASE64.encode(f)));
        self.client
            .post_form("ts/customerComplaints/createPositionMultiple", params)
            .await
    }

    /// POST ts/customerComplaints/updatePosition
    pub async fn update_position(&self, id: i64, quantity: f64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        params.push("quantity", quantity);
        self.client
            .post_form("ts/customerComplaints/updatePosition", params)
            .await
    }

    /// POST ts/customerComplaints/cancelPosition
    pub async fn cancel_position(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client
            .post_form("ts/customerComplaints/cancelPosition", params)
            .await
    }
}

/// Trade stock orders.
pub struct Orders<'a> {
    client: &'a AbcpClient,
}

impl Orders<'_> {
    /// POST ts/orders/createByCart
    #[allow(clippy::too_many_arguments)]
    pub async fn create_by_cart(
        &self,
        delivery_address: &str,
        delivery_person: &str,
        delivery_contact: &str,
        delivery_comment: Option<&str>,
        delivery_method_id: Option<i64>,
        number: Option<&str>,
        create_time: Option<DateTimeArg>,
        positions: &[i64],
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("deliveryAddress", delivery_address);
        params.push("deliveryPerson", delivery_person);
        params.push("deliveryContact", delivery_contact);
        params.push_opt("deliveryComment", delivery_comment);
        params.push_opt("deliveryMethodId", delivery_method_id);
        params.push_opt("number", number);
        params.push_opt("createTime", create_time.as_ref().map(|d| d.to_ts()));
        params.push_opt_csv("positions", Some(positions));
        self.client.post_form("ts/orders/createByCart", params).await
    }

    /// GET ts/orders/list
    pub async fn get_list(&self, filter: &TsOrdersFilter) -> Result<Value> {
        self.client.get("ts/orders/list", filter.params()?).await
    }

    /// GET ts/orders/get?orderId=…
    pub async fn get_order(&self, order_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("orderId", order_id);
        self.client.get("ts/orders/get", params).await
    }

    /// POST ts/orders/refuse
    pub async fn refuse(&self, order_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("orderId", order_id);
        self.client.post_form("ts/orders/refuse", params).await
    }
}

/// Trade stock cart.
pub struct Cart<'a> {
    client: &'a AbcpClient,
}

impl Cart<'_> {
    /// POST ts/cart/create
    pub async fn create(
        &self,
        brand: &str,
        number: &str,
        quantity: f64,
        supplier_code: Option<&str>,
        item_key: Option<&str>,
        agreement_id: Option<i64>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("brand", brand);
        params.push("number", number);
        params.push("quantity", quantity);
        params.push_opt("supplierCode", supplier_code);
        params.push_opt("itemKey", item_key);
        params.push_opt("agreementId", agreement_id);
        self.client.post_form("ts/cart/create", params).await
    }

    /// POST ts/cart/update
    pub async fn update(&self, position_id: i64, quantity: f64) -> Result<Value> {
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push("quantity", quantity);
        self.client.post_form("ts/cart/update", params).await
    }

    /// GET ts/cart/list
    pub async fn get_list(
        &self,
        position_ids: Option<&[i64]>,
        agreement_id: Option<i64>,
        limit: Option<i64>,
        skip: Option<i64>,
    ) -> Result<Value> {
        check_limit(limit)?;
        let mut params = Params::new();
        params.push_opt_csv("positionIds", position_ids);
        params.push_opt("agreementId", agreement_id);
        params.push_opt("limit", limit);
        params.push_opt("skip", skip);
        self.client.get("ts/cart/list", params).await
    }

    /// GET ts/cart/exists
    pub async fn exist(
        &self,
        agreement_id: i64,
        brand: &str,
        number_fix: &str,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("agreementId", agreement_id);
        params.push("brand", brand);
        params.push("numberFix", number_fix);
        self.client.get("ts/cart/exists", params).await
    }

    /// GET ts/cart/summary
    pub async fn summary(&self, agreement_id: Option<i64>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("agreementId", agreement_id);
        self.client.get("ts/cart/summary", params).await
    }

    /// POST ts/cart/clear
    pub async fn clear(&self, agreement_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("agreementId", agreement_id);
        self.client.post_form("ts/cart/clear", params).await
    }

    /// POST ts/cart/deletePositions
    pub async fn delete_positions(&self, position_ids: &[i64]) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt_csv("positionIds", Some(position_ids));
        self.client.post_form("ts/cart/deletePositions", params).await
    }
}

/// Trade stock order positions.
pub struct Positions<'a> {
    client: &'a AbcpClient,
}

const CLIENT_POSITION_INFO: &[&str] = &["delivery", "unpaidAmount"];

impl Positions<'_> {
    /// GET ts/positions/get
    pub async fn get_position(
        &self,
        position_id: i64,
        additional_info: Option<&[&str]>,
    ) -> Result<Value> {
        let info = check_fields(additional_info, CLIENT_POSITION_INFO)?;
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push_opt("additionalInfo", info);
        self.client.get("ts/positions/get", params).await
    }

    /// GET ts/positions/list
    pub async fn get_list(&self, filter: &TsPositionsFilter) -> Result<Value> {
        self.client
            .get("ts/positions/list", filter.params(CLIENT_POSITION_INFO)?)
            .await
    }

    /// POST ts/positions/cancel
    pub async fn cancel(
        &self,
        position_id: i64,
        additional_info: Option<&[&str]>,
    ) -> Result<Value> {
        let info = check_fields(additional_info, CLIENT_POSITION_INFO)?;
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push_opt("additionalInfo", info);
        self.client.post_form("ts/positions/cancel", params).await
    }

    /// POST ts/positions/massCancel
    pub async fn mass_cancel(
        &self,
        position_ids: &[i64],
        additional_info: Option<&[&str]>,
    ) -> Result<Value> {
        let info = check_fields(additional_info, CLIENT_POSITION_INFO)?;
        let mut params = Params::new();
        params.push_opt_csv("positionIds", Some(position_ids));
        params.push_opt("additionalInfo", info);
        self.client.post_form("ts/positions/massCancel", params).await
    }
}

/// Contract agreements between the shop and the customer.
pub struct Agreements<'a> {
    client: &'a AbcpClient,
}

impl Agreements<'_> {
    /// GET cp/ts/agreements/list
    pub async fn get_list(&self, filter: &AgreementsFilter) -> Result<Value> {
        self.client
            .get("cp/ts/agreements/list", filter.params()?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::client::{AbcpClient, ClientConfig};
    use crate::http::error::AbcpError;
    use crate::types::requests::{GoodReceiptsFilter, TsPositionsFilter};

    fn json_ok(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    async fn client(server: &MockServer) -> AbcpClient {
        let base = url::Url::parse(&server.uri())
            .and_then(|u| u.join("/"))
            .unwrap();
        AbcpClient::with_config_and_base_url(
            "id1886.public.api.abcp.ru",
            "89031234567",
            "1c7c0b3b8ab2eb1eafb0f1c91ceb3e97",
            ClientConfig::default(),
            base,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_good_receipts_filter_joins_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ts/goodReceipts/get"))
            .and(query_param("statuses", "1,2"))
            .and(query_param("output", "de"))
            .respond_with(json_ok(json!([])))
            .mount(&server)
            .await;

        let c = client(&server).await;
        let filter = GoodReceiptsFilter {
            statuses: Some(vec![1, 2]),
            output: Some("de".into()),
            ..Default::default()
        };
        c.ts().client().good_receipts().get(&filter).await.unwrap();
    }

    #[tokio::test]
    async fn test_good_receipt_positions_auto_too_short() {
        let server = MockServer::start().await;
        let c = client(&server).await;
        let err = c
            .ts()
            .client()
            .good_receipts()
            .get_positions(5, None, None, None, None, Some("ab"))
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::WrongParameter { .. }));
    }

    #[tokio::test]
    async fn test_picking_goods_sends_ignore_canceled_only_when_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ts/orderPickings/getGoods"))
            .and(query_param("ignoreCanceled", "1"))
            .respond_with(json_ok(json!([])))
            .mount(&server)
            .await;

        let c = client(&server).await;
        c.ts()
            .client()
            .order_pickings()
            .get_positions(5, None, None, None, None, None, Some(true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_complaint_file_is_base64_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ts/customerComplaints/createPositionMultiple"))
            .and(body_string_contains("customComplaintFile=aGVsbG8%3D"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let c = client(&server).await;
        c.ts()
            .client()
            .customer_complaints()
            .create_position_multiple(
                &[json!({"orderPickingPositionId": 3, "quantity": 1})],
                None,
                Some("damaged on arrival"),
                Some(b"hello"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cart_delete_positions_csv() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ts/cart/deletePositions"))
            .and(body_string_contains("positionIds=4%2C5%2C6"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let c = client(&server).await;
        c.ts()
            .client()
            .cart()
            .delete_positions(&[4, 5, 6])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_positions_additional_info_whitelist() {
        let server = MockServer::start().await;
        let c = client(&server).await;
        let err = c
            .ts()
            .client()
            .positions()
            .get_position(11, Some(&["reserv"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::WrongParameter { .. }));

        let filter = TsPositionsFilter {
            statuses: Some(vec!["finished".into()]),
            ..Default::default()
        };
        Mock::given(method("GET"))
            .and(path("/ts/positions/list"))
            .and(query_param("statuses", "finished"))
            .respond_with(json_ok(json!([])))
            .mount(&server)
            .await;
        c.ts().client().positions().get_list(&filter).await.unwrap();
    }
}
