/*
[INPUT]:  Warehouse operations, returns, complaints, payments and tag arguments
[OUTPUT]: JSON responses from the administrative trade stock endpoints
[POS]:    ts admin namespace - the cp/ts goods-flow surface
[UPDATE]: When the vendor extends the administrative trade stock surface
*/

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::http::client::AbcpClient;
use crate::http::dates::DateTimeArg;
use crate::http::error::{AbcpError, Result};
use crate::http::params::{
    Params, check_fields, check_flags, check_limit, check_one_of, check_range,
};
use crate::types::requests::{
    AdminCartOrder, AdminPositionsFilter, AgreementsFilter, ComplaintPositionsFilter,
    CustomerComplaintsFilter, GrPositionData, OrderPickingsFilter,
    SupplierOrderPositionsFilter, SupplierOrdersFilter, SupplierReturnOperationsFilter,
    SupplierReturnPositionsFilter, TsOrdersFilter, TsPaymentsFilter,
};

/// Administrative trade stock methods. Handed out by [`crate::ts::Ts::admin`],
/// which refuses client credentials.
pub struct TsAdmin<'a> {
    client: &'a AbcpClient,
}

impl<'a> TsAdmin<'a> {
    pub(crate) fn new(client: &'a AbcpClient) -> Self {
        Self { client }
    }

    pub fn supplier_returns(&self) -> SupplierReturns<'a> {
        SupplierReturns { client: self.client }
    }

    pub fn order_pickings(&self) -> OrderPickings<'a> {
        OrderPickings { client: self.client }
    }

    pub fn customer_complaints(&self) -> CustomerComplaints<'a> {
        CustomerComplaints { client: self.client }
    }

    pub fn distributor_owners(&self) -> DistributorOwners<'a> {
        DistributorOwners { client: self.client }
    }

    pub fn orders(&self) -> Orders<'a> {
        Orders { client: self.client }
    }

    pub fn messages(&self) -> Messages<'a> {
        Messages { client: self.client }
    }

    pub fn cart(&self) -> Cart<'a> {
        Cart { client: self.client }
    }

    pub fn positions(&self) -> Positions<'a> {
        Positions { client: self.client }
    }

    pub fn positions_messages(&self) -> PositionsMessages<'a> {
        PositionsMessages { client: self.client }
    }

    pub fn good_receipts(&self) -> GoodReceipts<'a> {
        GoodReceipts { client: self.client }
    }

    pub fn tags(&self) -> Tags<'a> {
        Tags { client: self.client }
    }

    pub fn tags_relationships(&self) -> TagsRelationships<'a> {
        TagsRelationships { client: self.client }
    }

    pub fn payments(&self) -> Payments<'a> {
        Payments { client: self.client }
    }

    pub fn payment_methods(&self) -> PaymentMethods<'a> {
        PaymentMethods { client: self.client }
    }

    pub fn agreements(&self) -> Agreements<'a> {
        Agreements { client: self.client }
    }

    pub fn legal_persons(&self) -> LegalPersons<'a> {
        LegalPersons { client: self.client }
    }

    pub fn supplier_orders(&self) -> SupplierOrders<'a> {
        SupplierOrders { client: self.client }
    }
}

/// Returns to suppliers, split into operations, their positions and the
/// free-form position attributes.
pub struct SupplierReturns<'a> {
    client: &'a AbcpClient,
}

impl<'a> SupplierReturns<'a> {
    pub fn operations(&self) -> SupplierReturnOperations<'a> {
        SupplierReturnOperations { client: self.client }
    }

    pub fn positions(&self) -> SupplierReturnPositions<'a> {
        SupplierReturnPositions { client: self.client }
    }

    pub fn position_attrs(&self) -> SupplierReturnPositionAttrs<'a> {
        SupplierReturnPositionAttrs { client: self.client }
    }
}

const RETURN_OPERATION_FIELDS: &[&str] = &["goodsReceipt", "agreement", "tags"];

pub struct SupplierReturnOperations<'a> {
    client: &'a AbcpClient,
}

impl SupplierReturnOperations<'_> {
    /// GET cp/ts/supplierReturns/operations/list
    pub async fn get_list(&self, filter: &SupplierReturnOperationsFilter) -> Result<Value> {
        self.client
            .get(
                "cp/ts/supplierReturns/operations/list",
                filter.params(RETURN_OPERATION_FIELDS)?,
            )
            .await
    }

    /// GET cp/ts/supplierReturns/operations/sum
    pub async fn get_sum(&self, filter: &SupplierReturnOperationsFilter) -> Result<Value> {
        self.client
            .get(
                "cp/ts/supplierReturns/operations/sum",
                filter.params(RETURN_OPERATION_FIELDS)?,
            )
            .await
    }

    /// GET cp/ts/supplierReturns/operations/get?id=…
    pub async fn get(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client
            .get("cp/ts/supplierReturns/operations/get", params)
            .await
    }

    /// POST cp/ts/supplierReturns/operations/create
    pub async fn create(
        &self,
        creator_id: i64,
        supplier_id: i64,
        goods_receipt_id: i64,
        agreement_id: i64,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("creatorId", creator_id);
        params.push("supplierId", supplier_id);
        params.push("goodsReceiptId", goods_receipt_id);
        params.push("agreementId", agreement_id);
        self.client
            .post_form("cp/ts/supplierReturns/operations/create", params)
            .await
    }

    /// POST cp/ts/supplierReturns/operations/update
    pub async fn update(
        &self,
        id: i64,
        number: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, RETURN_OPERATION_FIELDS)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push_opt("number", number);
        params.push_opt("fields", fields);
        self.client
            .post_form("cp/ts/supplierReturns/operations/update", params)
            .await
    }

    /// POST cp/ts/supplierReturns/operations/delete
    pub async fn delete(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client
            .post_form("cp/ts/supplierReturns/operations/delete", params)
            .await
    }
}

const RETURN_POSITION_FIELDS: &[&str] = &[
    "item",
    "location",
    "operationInfo",
    "tags",
    "goodsReceiptPos",
    "availableQuantity",
    "customerComplaintPos",
];

pub struct SupplierReturnPositions<'a> {
    client: &'a AbcpClient,
}

impl SupplierReturnPositions<'_> {
    /// GET cp/ts/supplierReturns/positions/list
    pub async fn get_list(&self, filter: &SupplierReturnPositionsFilter) -> Result<Value> {
        self.client
            .get(
                "cp/ts/supplierReturns/positions/list",
                filter.params(RETURN_POSITION_FIELDS)?,
            )
            .await
    }

    /// GET cp/ts/supplierReturns/positions/sum
    pub async fn get_sum(&self, filter: &SupplierReturnPositionsFilter) -> Result<Value> {
        self.client
            .get(
                "cp/ts/supplierReturns/positions/sum",
                filter.params(RETURN_POSITION_FIELDS)?,
            )
            .await
    }

    /// GET cp/ts/supplierReturns/positions/status, the status dictionary.
    pub async fn status(&self) -> Result<Value> {
        self.client
            .get("cp/ts/supplierReturns/positions/status", Params::new())
            .await
    }

    /// GET cp/ts/supplierReturns/positions/get?id=…
    pub async fn get(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client
            .get("cp/ts/supplierReturns/positions/get", params)
            .await
    }

    /// POST cp/ts/supplierReturns/positions/createMultiple
    pub async fn create_multiple(&self, op_id: i64, poses_data: &[Value]) -> Result<Value> {
        let mut params = Params::new();
        params.push("opId", op_id);
        params.push_objects("posesData", poses_data);
        self.client
            .post_form("cp/ts/supplierReturns/positions/createMultiple", params)
            .await
    }

    /// POST cp/ts/supplierReturns/positions/split
    pub async fn split(
        &self,
        id: i64,
        quantity: f64,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, RETURN_POSITION_FIELDS)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push("quantity", quantity);
        params.push_opt("fields", fields);
        self.client
            .post_form("cp/ts/supplierReturns/positions/split", params)
            .await
    }

    /// POST cp/ts/supplierReturns/positions/update
    pub async fn update(
        &self,
        id: i64,
        r#type: Option<i64>,
        loc_id: Option<i64>,
        quantity: Option<f64>,
        comment: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, RETURN_POSITION_FIELDS)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push_opt("type", r#type);
        params.push_opt("locId", loc_id);
        params.push_opt("quantity", quantity);
        params.push_opt("comment", comment);
        params.push_opt("fields", fields);
        self.client
            .post_form("cp/ts/supplierReturns/positions/update", params)
            .await
    }

    /// POST cp/ts/supplierReturns/positions/changeStatus
    pub async fn change_status(
        &self,
        id: i64,
        status: i64,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, RETURN_POSITION_FIELDS)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push("status", status);
        params.push_opt("fields", fields);
        self.client
            .post_form("cp/ts/supplierReturns/positions/changeStatus", params)
            .await
    }
}

pub struct SupplierReturnPositionAttrs<'a> {
    client: &'a AbcpClient,
}

impl SupplierReturnPositionAttrs<'_> {
    /// POST cp/ts/supplierReturns/positions/attr/create
    ///
    /// `attr` is one object flattened to `attr[key]`.
    pub async fn create(&self, id: i64, attr: &Value) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        params.push_object("attr", attr);
        self.client
            .post_form("cp/ts/supplierReturns/positions/attr/create", params)
            .await
    }

    /// POST cp/ts/supplierReturns/positions/attr/update
    pub async fn update(
        &self,
        id: i64,
        old_name: &str,
        new_name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        params.push("oldName", old_name);
        params.push_opt("newName", new_name);
        params.push_opt("description", description);
        self.client
            .post_form("cp/ts/supplierReturns/positions/attr/update", params)
            .await
    }

    /// POST cp/ts/supplierReturns/positions/attr/delete
    pub async fn delete(&self, id: i64, name: &str) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        params.push("name", name);
        self.client
            .post_form("cp/ts/supplierReturns/positions/attr/delete", params)
            .await
    }
}

/// Order picking operations across all customers.
pub struct OrderPickings<'a> {
    client: &'a AbcpClient,
}

impl OrderPickings<'_> {
    /// POST cp/ts/orderPickings/fastGetOut
    ///
    /// Creates a picking and ships it out in one step.
    #[allow(clippy::too_many_arguments)]
    pub async fn fast_get_out(
        &self,
        client_id: i64,
        supplier_id: i64,
        positions: &[Value],
        distributor_id: Option<i64>,
        route_id: Option<i64>,
        location_id: Option<i64>,
        order_picking_reseller_data: Option<&Value>,
        number: Option<&str>,
        date: Option<DateTimeArg>,
        execution_date: Option<DateTimeArg>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("clientId", client_id);
        params.push("supplierId", supplier_id);
        params.push_objects("positions", positions);
        params.push_opt("distributorId", distributor_id);
        params.push_opt("routeId", route_id);
        params.push_opt("locationId", location_id);
        if let Some(data) = order_picking_reseller_data {
            params.push_object("orderPickingResellerData", data);
        }
        params.push_opt("number", number);
        params.push_opt("date", date.as_ref().map(|d| d.to_ts()));
        params.push_opt("executionDate", execution_date.as_ref().map(|d| d.to_ts()));
        self.client
            .post_form("cp/ts/orderPickings/fastGetOut", params)
            .await
    }

    /// POST cp/ts/orderPickings/get
    ///
    /// A listing that travels as POST, unlike the rest of the family.
    pub async fn get(&self, filter: &OrderPickingsFilter) -> Result<Value> {
        self.client
            .post_form("cp/ts/orderPickings/get", filter.params()?)
            .await
    }

    /// GET cp/ts/orderPickings/getGoods
    #[allow(clippy::too_many_arguments)]
    pub async fn get_goods(
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
        check_flags("output", output, "eo")?;
        let mut params = Params::new();
        params.push("opId", op_id);
        params.push_opt("limit", limit);
        params.push_opt("skip", skip);
        params.push_opt("output", output);
        params.push_opt("productId", product_id);
        params.push_opt("itemId", item_id);
        if ignore_canceled == Some(true) {
            params.push("ignoreCanceled", "1");
        }
        self.client.get("cp/ts/orderPickings/getGoods", params).await
    }

    /// POST cp/ts/orderPickings/createByOldPos
    #[allow(clippy::too_many_arguments)]
    pub async fn create_by_old_pos(
        &self,
        agreement_id: i64,
        account_details_id: i64,
        loc_id: i64,
        pp_ids: &[i64],
        create_date: Option<DateTimeArg>,
        op_id: Option<i64>,
        status_id: Option<i64>,
        done_right_away: Option<bool>,
        output: Option<&str>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("agreementId", agreement_id);
        params.push("accountDetailsId", account_details_id);
        params.push("locId", loc_id);
        params.push_opt_csv("ppIds", Some(pp_ids));
        params.push_opt("createDate", create_date.as_ref().map(|d| d.to_ts()));
        params.push_opt("opId", op_id);
        params.push_opt("statusId", status_id);
        params.push_opt_flag("doneRightAway", done_right_away);
        params.push_opt("output", output);
        self.client
            .post_form("cp/ts/orderPickings/createByOldPos", params)
            .await
    }

    /// POST cp/ts/orderPickings/changeStatus
    pub async fn change_status(
        &self,
        id: i64,
        operation_status_id: i64,
        positions_status_id: Option<i64>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        params.push("operationStatusId", operation_status_id);
        params.push_opt("positionsStatusId", positions_status_id);
        self.client
            .post_form("cp/ts/orderPickings/changeStatus", params)
            .await
    }

    /// POST cp/ts/orderPickings/update
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        number: Option<&str>,
        creator_id: Option<i64>,
        worker_id: Option<i64>,
        client_id: Option<i64>,
        agreement_id: Option<i64>,
        account_details_id: Option<i64>,
        loc_id: Option<i64>,
        reseller_data: Option<&Value>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        params.push_opt("number", number);
        params.push_opt("creatorId", creator_id);
        params.push_opt("workerId", worker_id);
        params.push_opt("clientId", client_id);
        params.push_opt("agreementId", agreement_id);
        params.push_opt("accountDetailsId", account_details_id);
        params.push_opt("locId", loc_id);
        if let Some(data) = reseller_data {
            params.push_object("resellerData", data);
        }
        self.client.post_form("cp/ts/orderPickings/update", params).await
    }

    /// POST cp/ts/orderPickings/deletePosition
    pub async fn delete(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client
            .post_form("cp/ts/orderPickings/deletePosition", params)
            .await
    }
}

const ADMIN_COMPLAINT_FIELDS: &[&str] = &["orderPicking", "agreement", "tags", "posInfo"];
const ADMIN_COMPLAINT_UPDATE_FIELDS: &[&str] = &["orderPicking", "agreement", "posInfo"];
const ADMIN_COMPLAINT_POSITION_FIELDS: &[&str] = &[
    "item",
    "product",
    "location",
    "orderPickingInfo",
    "tags",
    "operationInfo",
    "supplierReturnPos",
];

/// Customer complaints handled from the shop side.
pub struct CustomerComplaints<'a> {
    client: &'a AbcpClient,
}

impl CustomerComplaints<'_> {
    /// GET cp/ts/customerComplaints/get
    pub async fn get(&self, filter: &CustomerComplaintsFilter) -> Result<Value> {
        self.client
            .get(
                "cp/ts/customerComplaints/get",
                filter.params(ADMIN_COMPLAINT_FIELDS)?,
            )
            .await
    }

    /// GET cp/ts/customerComplaints/getPositions
    pub async fn get_positions(&self, filter: &ComplaintPositionsFilter) -> Result<Value> {
        self.client
            .get(
                "cp/ts/customerComplaints/getPositions",
                filter.params(ADMIN_COMPLAINT_POSITION_FIELDS)?,
            )
            .await
    }

    /// POST cp/ts/customerComplaints/create
    pub async fn create(&self, order_picking_id: i64, positions: &[Value]) -> Result<Value> {
        let mut params = Params::new();
        params.push("orderPickingId", order_picking_id);
        params.push_objects("positions", positions);
        self.client
            .post_form("cp/ts/customerComplaints/create", params)
            .await
    }

    /// POST cp/ts/customerComplaints/createPosition
    pub async fn create_position(
        &self,
        op_id: i64,
        order_picking_position_id: i64,
        quantity: f64,
        r#type: i64,
        comment: Option<&str>,
    ) -> Result<Value> {
        check_range("type", Some(r#type), 1..=3)?;
        let mut params = Params::new();
        params.push("opId", op_id);
        params.push("orderPickingPositionId", order_picking_position_id);
        params.push("quantity", quantity);
        params.push("type", r#type);
        params.push_opt("comment", comment);
        self.client
            .post_form("cp/ts/customerComplaints/createPosition", params)
            .await
    }

    /// POST cp/ts/customerComplaints/createPositionMultiple
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
        params.push_opt(
            "customComplaintFile",
            custom_complaint_file.map(|f| BASE64.encode(f)),
        );
        self.client
            .post_form("cp/ts/customerComplaints/createPositionMultiple", params)
            .await
    }

    /// POST cp/ts/customerComplaints/updatePosition
    ///
    /// At least one of `quantity`, `type`, `comment` must be given.
    pub async fn update_position(
        &self,
        id: i64,
        quantity: Option<f64>,
        r#type: Option<i64>,
        comment: Option<&str>,
    ) -> Result<Value> {
        if quantity.is_none() && r#type.is_none() && comment.is_none() {
            return Err(AbcpError::ParameterRequired(
                "quantity, type or comment".into(),
            ));
        }
        check_range("type", r#type, 1..=3)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push_opt("quantity", quantity);
        params.push_opt("type", r#type);
        params.push_opt("comment", comment);
        self.client
            .post_form("cp/ts/customerComplaints/updatePosition", params)
            .await
    }

    /// POST cp/ts/customerComplaints/changeStatusPosition
    pub async fn change_position_status(&self, id: i64, status: i64) -> Result<Value> {
        check_range("status", Some(status), 1..=8)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push("status", status);
        self.client
            .post_form("cp/ts/customerComplaints/changeStatusPosition", params)
            .await
    }

    /// POST cp/ts/customerComplaints/update
    pub async fn update(
        &self,
        id: i64,
        number: Option<&str>,
        expert_id: Option<i64>,
        custom_complaint_file: Option<&[u8]>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, ADMIN_COMPLAINT_UPDATE_FIELDS)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push_opt("number", number);
        params.push_opt("expertId", expert_id);
        params.push_opt(
            "customComplaintFile",
            custom_complaint_file.map(|f| BASE64.encode(f)),
        );
        params.push_opt("fields", fields);
        self.client
            .post_form("cp/ts/customerComplaints/update", params)
            .await
    }

    /// POST cp/ts/customerComplaints/updateCustomFile
    pub async fn update_custom_file(
        &self,
        id: i64,
        custom_complaint_file: &[u8],
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, ADMIN_COMPLAINT_UPDATE_FIELDS)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push("customComplaintFile", BASE64.encode(custom_complaint_file));
        params.push_opt("fields", fields);
        self.client
            .post_form("cp/ts/customerComplaints/updateCustomFile", params)
            .await
    }
}

/// Supplier ownership lookup.
pub struct DistributorOwners<'a> {
    client: &'a AbcpClient,
}

impl DistributorOwners<'_> {
    /// GET cp/ts/distributorOwners?distributorId=…
    pub async fn distributor_owners(&self, distributor_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("distributorId", distributor_id);
        self.client.get("cp/ts/distributorOwners", params).await
    }
}

const ADMIN_ORDER_FIELDS: &[&str] =
    &["deliveries", "agreement", "tags", "posInfo", "amounts"];

/// Trade stock orders managed from the shop side.
pub struct Orders<'a> {
    client: &'a AbcpClient,
}

impl Orders<'_> {
    /// POST cp/ts/orders/create
    pub async fn create(
        &self,
        client_id: i64,
        number: Option<&str>,
        agreement_id: Option<i64>,
        create_time: Option<DateTimeArg>,
        manager_id: Option<i64>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, ADMIN_ORDER_FIELDS)?;
        let mut params = Params::new();
        params.push("clientId", client_id);
        params.push_opt("number", number);
        params.push_opt("agreementId", agreement_id);
        params.push_opt("createTime", create_time.as_ref().map(|d| d.to_ts()));
        params.push_opt("managerId", manager_id);
        params.push_opt("fields", fields);
        self.client.post_form("cp/ts/orders/create", params).await
    }

    /// POST cp/ts/orders/createByCart
    pub async fn create_by_cart(&self, order: &AdminCartOrder) -> Result<Value> {
        self.client
            .post_form("cp/ts/orders/createByCart", order.params(ADMIN_ORDER_FIELDS)?)
            .await
    }

    /// GET cp/ts/orders/list
    pub async fn orders_list(&self, filter: &TsOrdersFilter) -> Result<Value> {
        self.client.get("cp/ts/orders/list", filter.params()?).await
    }

    /// GET cp/ts/orders/get?orderId=…
    pub async fn get(&self, order_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("orderId", order_id);
        self.client.get("cp/ts/orders/get", params).await
    }

    /// POST cp/ts/orders/refuse
    pub async fn refuse(&self, order_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("orderId", order_id);
        self.client.post_form("cp/ts/orders/refuse", params).await
    }

    /// POST cp/ts/orders/update
    ///
    /// At least one field besides the id must be given.
    pub async fn update(
        &self,
        order_id: i64,
        number: Option<&str>,
        client_id: Option<i64>,
        agreement_id: Option<i64>,
        manager_id: Option<i64>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        if number.is_none()
            && client_id.is_none()
            && agreement_id.is_none()
            && manager_id.is_none()
        {
            return Err(AbcpError::ParameterRequired(
                "number, clientId, agreementId or managerId".into(),
            ));
        }
        let fields = check_fields(fields, ADMIN_ORDER_FIELDS)?;
        let mut params = Params::new();
        params.push("orderId", order_id);
        params.push_opt("number", number);
        params.push_opt("clientId", client_id);
        params.push_opt("agreementId", agreement_id);
        params.push_opt("managerId", manager_id);
        params.push_opt("fields", fields);
        self.client.post_form("cp/ts/orders/update", params).await
    }

    /// POST cp/ts/orders/merge
    pub async fn merge(
        &self,
        main_order_id: i64,
        merge_orders_ids: &[i64],
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, ADMIN_ORDER_FIELDS)?;
        let mut params = Params::new();
        params.push("mainOrderId", main_order_id);
        params.push_opt_csv("mergeOrdersIds", Some(merge_orders_ids));
        params.push_opt("fields", fields);
        self.client.post_form("cp/ts/orders/merge", params).await
    }

    /// POST cp/ts/orders/split
    pub async fn split(
        &self,
        order_id: i64,
        position_ids: &[i64],
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, ADMIN_ORDER_FIELDS)?;
        let mut params = Params::new();
        params.push("orderId", order_id);
        params.push_opt_csv("positionIds", Some(position_ids));
        params.push_opt("fields", fields);
        self.client.post_form("cp/ts/orders/split", params).await
    }

    /// POST cp/ts/orders/reprice
    pub async fn reprice(
        &self,
        order_id: i64,
        new_sum: Decimal,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let fields = check_fields(fields, ADMIN_ORDER_FIELDS)?;
        let mut params = Params::new();
        params.push("orderId", order_id);
        params.push("newSum", new_sum);
        params.push_opt("fields", fields);
        self.client.post_form("cp/ts/orders/reprice", params).await
    }
}

/// Messages attached to trade stock orders.
pub struct Messages<'a> {
    client: &'a AbcpClient,
}

impl Messages<'_> {
    /// POST cp/ts/orders/messages/create
    pub async fn create(
        &self,
        order_id: i64,
        message: &str,
        employee_id: Option<i64>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("orderId", order_id);
        params.push("message", message);
        params.push_opt("employeeId", employee_id);
        self.client
            .post_form("cp/ts/orders/messages/create", params)
            .await
    }

    /// GET cp/ts/orders/messages/get?messageId=…
    pub async fn get_one(&self, message_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("messageId", message_id);
        self.client.get("cp/ts/orders/messages/get", params).await
    }

    /// GET cp/ts/orders/messages/list
    pub async fn get_list(
        &self,
        order_id: i64,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Value> {
        check_limit(limit)?;
        let mut params = Params::new();
        params.push("orderId", order_id);
        params.push_opt("skip", skip);
        params.push_opt("limit", limit);
        self.client.get("cp/ts/orders/messages/list", params).await
    }

    /// POST cp/ts/orders/messages/update
    pub async fn update(&self, message_id: i64, message: &str) -> Result<Value> {
        let mut params = Params::new();
        params.push("messageId", message_id);
        params.push("message", message);
        self.client
            .post_form("cp/ts/orders/messages/update", params)
            .await
    }

    /// POST cp/ts/orders/messages/delete
    pub async fn delete(&self, message_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("messageId", message_id);
        self.client
            .post_form("cp/ts/orders/messages/delete", params)
            .await
    }
}

fn client_or_guest(client_id: Option<i64>, guest_id: Option<i64>) -> Result<()> {
    if client_id.is_some() == guest_id.is_some() {
        return Err(AbcpError::ParameterRequired(
            "exactly one of clientId or guestId".into(),
        ));
    }
    Ok(())
}

/// Customer carts managed from the shop side.
pub struct Cart<'a> {
    client: &'a AbcpClient,
}

impl Cart<'_> {
    /// POST cp/ts/cart/create
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        client_id: i64,
        brand: &str,
        number: &str,
        number_fix: &str,
        quantity: f64,
        distributor_route_id: i64,
        item_key: &str,
        agreement_id: Option<i64>,
        item_id: Option<i64>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("clientId", client_id);
        params.push("brand", brand);
        params.push("number", number);
        params.push("numberFix", number_fix);
        params.push("quantity", quantity);
        params.push("distributorRouteId", distributor_route_id);
        params.push("itemKey", item_key);
        params.push_opt("agreementId", agreement_id);
        params.push_opt("itemId", item_id);
        self.client.post_form("cp/ts/cart/create", params).await
    }

    /// POST cp/ts/cart/update
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        position_id: i64,
        quantity: f64,
        client_id: Option<i64>,
        guest_id: Option<i64>,
        sell_price: Option<Decimal>,
        cl_to_res_rate: Option<Decimal>,
        cl_sell_price: Option<Decimal>,
        availability: Option<i64>,
        packing: Option<i64>,
        deadline: Option<i64>,
        deadline_max: Option<i64>,
    ) -> Result<Value> {
        client_or_guest(client_id, guest_id)?;
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push("quantity", quantity);
        params.push_opt("clientId", client_id);
        params.push_opt("guestId", guest_id);
        params.push_opt("sellPrice", sell_price);
        params.push_opt("clToResRate", cl_to_res_rate);
        params.push_opt("clSellPrice", cl_sell_price);
        params.push_opt("availability", availability);
        params.push_opt("packing", packing);
        params.push_opt("deadline", deadline);
        params.push_opt("deadlineMax", deadline_max);
        self.client.post_form("cp/ts/cart/update", params).await
    }

    /// GET cp/ts/cart/list
    pub async fn get_list(
        &self,
        client_id: Option<i64>,
        guest_id: Option<i64>,
        position_ids: Option<&[i64]>,
        agreement_id: Option<i64>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Value> {
        client_or_guest(client_id, guest_id)?;
        check_limit(limit)?;
        let mut params = Params::new();
        params.push_opt("clientId", client_id);
        params.push_opt("guestId", guest_id);
        params.push_opt_csv("positionIds", position_ids);
        params.push_opt("agreementId", agreement_id);
        params.push_opt("skip", skip);
        params.push_opt("limit", limit);
        self.client.get("cp/ts/cart/list", params).await
    }

    /// GET cp/ts/cart/exists
    pub async fn exist(
        &self,
        client_id: i64,
        agreement_id: i64,
        brand: &str,
        number_fix: &str,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("clientId", client_id);
        params.push("agreementId", agreement_id);
        params.push("brand", brand);
        params.push("numberFix", number_fix);
        self.client.get("cp/ts/cart/exists", params).await
    }

    /// GET cp/ts/cart/summary
    pub async fn summary(
        &self,
        client_id: Option<i64>,
        guest_id: Option<i64>,
        agreement_id: Option<i64>,
    ) -> Result<Value> {
        client_or_guest(client_id, guest_id)?;
        let mut params = Params::new();
        params.push_opt("clientId", client_id);
        params.push_opt("guestId", guest_id);
        params.push_opt("agreementId", agreement_id);
        self.client.get("cp/ts/cart/summary", params).await
    }

    /// POST cp/ts/cart/clear
    pub async fn clear(
        &self,
        agreement_id: i64,
        client_id: Option<i64>,
        guest_id: Option<i64>,
    ) -> Result<Value> {
        client_or_guest(client_id, guest_id)?;
        let mut params = Params::new();
        params.push("agreementId", agreement_id);
        params.push_opt("clientId", client_id);
        params.push_opt("guestId", guest_id);
        self.client.post_form("cp/ts/cart/clear", params).await
    }

    /// POST cp/ts/cart/delete
    ///
    /// Position ids travel indexed here, not comma separated.
    pub async fn delete_positions(
        &self,
        position_ids: &[i64],
        client_id: Option<i64>,
        guest_id: Option<i64>,
    ) -> Result<Value> {
        client_or_guest(client_id, guest_id)?;
        let mut params = Params::new();
        params.push_indexed("positionIds", position_ids);
        params.push_opt("clientId", client_id);
        params.push_opt("guestId", guest_id);
        self.client.post_form("cp/ts/cart/delete", params).await
    }

    /// POST cp/ts/cart/transfer, moves a guest cart onto a client account.
    pub async fn transfer(&self, guest_id: i64, client_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("guestId", guest_id);
        params.push("clientId", client_id);
        self.client.post_form("cp/ts/cart/transfer", params).await
    }
}

const ADMIN_POSITION_INFO: &[&str] = &[
    "reserv",
    "product",
    "orderPicking",
    "customerComplaintPoses",
    "supplierOrder",
    "grPosition",
    "order",
    "delivery",
    "tags",
    "unpaidAmount",
];

/// Trade stock order positions managed from the shop side.
pub struct Positions<'a> {
    client: &'a AbcpClient,
}

impl Positions<'_> {
    /// GET cp/ts/positions/get
    pub async fn get(
        &self,
        position_id: i64,
        additional_info: Option<&[&str]>,
    ) -> Result<Value> {
        let info = check_fields(additional_info, ADMIN_POSITION_INFO)?;
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push_opt("additionalInfo", info);
        self.client.get("cp/ts/positions/get", params).await
    }

    /// GET cp/ts/positions/list
    pub async fn get_list(&self, filter: &AdminPositionsFilter) -> Result<Value> {
        self.client
            .get("cp/ts/positions/list", filter.params()?)
            .await
    }

    /// POST cp/ts/positions/create
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        order_id: i64,
        client_id: i64,
        route_id: i64,
        distributor_id: i64,
        item_key: &str,
        quantity: f64,
        sell_price: Decimal,
        brand: &str,
        number_fix: &str,
        number: &str,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("orderId", order_id);
        params.push("clientId", client_id);
        params.push("routeId", route_id);
        params.push("distributorId", distributor_id);
        params.push("itemKey", item_key);
        params.push("quantity", quantity);
        params.push("sellPrice", sell_price);
        params.push("brand", brand);
        params.push("numberFix", number_fix);
        params.push("number", number);
        self.client.post_form("cp/ts/positions/create", params).await
    }

    /// POST cp/ts/positions/update
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        position_id: i64,
        route_id: Option<i64>,
        distributor_id: Option<i64>,
        quantity: Option<f64>,
        sell_price: Option<Decimal>,
        cl_to_res_rate: Option<Decimal>,
        cl_sell_price: Option<Decimal>,
        price_data_sell_price: Option<Decimal>,
        prepayment_amount: Option<Decimal>,
        deadline_time: Option<DateTimeArg>,
        deadline_time_max: Option<DateTimeArg>,
        client_refusal: Option<bool>,
        delivery_id: Option<i64>,
        status: Option<&str>,
    ) -> Result<Value> {
        check_one_of("status", status, &["new", "prepayment"])?;
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push_opt("routeId", route_id);
        params.push_opt("distributorId", distributor_id);
        params.push_opt("quantity", quantity);
        params.push_opt("sellPrice", sell_price);
        params.push_opt("clToResRate", cl_to_res_rate);
        params.push_opt("clSellPrice", cl_sell_price);
        params.push_opt("priceDataSellPrice", price_data_sell_price);
        params.push_opt("prepaymentAmount", prepayment_amount);
        params.push_opt("deadlineTime", deadline_time.as_ref().map(|d| d.to_ts()));
        params.push_opt(
            "deadlineTimeMax",
            deadline_time_max.as_ref().map(|d| d.to_ts()),
        );
        params.push_opt_bool_str("clientRefusal", client_refusal);
        params.push_opt("deliveryId", delivery_id);
        params.push_opt("status", status);
        self.client.post_form("cp/ts/positions/update", params).await
    }

    /// POST cp/ts/positions/cancel
    pub async fn cancel(&self, position_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("positionId", position_id);
        self.client.post_form("cp/ts/positions/cancel", params).await
    }

    /// POST cp/ts/positions/massCancel
    pub async fn mass_cancel(&self, position_ids: &[i64]) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt_csv("positionIds", Some(position_ids));
        self.client
            .post_form("cp/ts/positions/massCancel", params)
            .await
    }

    /// POST cp/ts/positions/changeStatus
    pub async fn change_status(&self, position_ids: &[i64], status: &str) -> Result<Value> {
        check_one_of("status", Some(status), &["new", "prepayment"])?;
        let mut params = Params::new();
        params.push_opt_csv("positionIds", Some(position_ids));
        params.push("status", status);
        self.client
            .post_form("cp/ts/positions/changeStatus", params)
            .await
    }

    /// POST cp/ts/positions/split
    pub async fn split(&self, position_id: i64, quantity: f64) -> Result<Value> {
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push("quantity", quantity);
        self.client.post_form("cp/ts/positions/split", params).await
    }

    /// POST cp/ts/positions/merge
    pub async fn merge(
        &self,
        main_position_id: i64,
        merge_positions_ids: &[i64],
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("mainPositionId", main_position_id);
        params.push_opt_csv("mergePositionsIds", Some(merge_positions_ids));
        self.client.post_form("cp/ts/positions/merge", params).await
    }
}

/// Messages attached to individual positions.
pub struct PositionsMessages<'a> {
    client: &'a AbcpClient,
}

impl PositionsMessages<'_> {
    /// GET cp/ts/positions/message/list
    pub async fn get_list(
        &self,
        position_id: i64,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Value> {
        check_limit(limit)?;
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push_opt("skip", skip);
        params.push_opt("limit", limit);
        self.client.get("cp/ts/positions/message/list", params).await
    }

    /// GET cp/ts/positions/message/get?messageId=…
    pub async fn get(&self, message_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("messageId", message_id);
        self.client.get("cp/ts/positions/message/get", params).await
    }

    /// POST cp/ts/positions/message/create
    ///
    /// The creation date travels in the `cp` date format.
    pub async fn create(
        &self,
        position_id: i64,
        message: &str,
        employee_id: Option<i64>,
        date: Option<DateTimeArg>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("positionId", position_id);
        params.push("message", message);
        params.push_opt("employeeId", employee_id);
        params.push_opt("date", date.as_ref().map(|d| d.to_cp()));
        self.client
            .post_form("cp/ts/positions/message/create", params)
            .await
    }

    /// POST cp/ts/positions/message/update
    pub async fn update(
        &self,
        message_id: i64,
        message: &str,
        employee_id: Option<i64>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("messageId", message_id);
        params.push("message", message);
        params.push_opt("employeeId", employee_id);
        self.client
            .post_form("cp/ts/positions/message/update", params)
            .await
    }

    /// POST cp/ts/positions/message/delete
    pub async fn delete(&self, message_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("messageId", message_id);
        self.client
            .post_form("cp/ts/positions/message/delete", params)
            .await
    }
}

/// Goods receipts managed from the shop side.
pub struct GoodReceipts<'a> {
    client: &'a AbcpClient,
}

impl GoodReceipts<'_> {
    /// GET cp/ts/goodReceipts/getPositions, the receipt operation listing.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_positions(
        &self,
        creator_id: Option<i64>,
        supplier_id: Option<i64>,
        agreement_id: Option<i64>,
        status: Option<i64>,
        date_start: Option<DateTimeArg>,
        date_end: Option<DateTimeArg>,
        skip: Option<i64>,
        limit: Option<i64>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        check_limit(limit)?;
        let fields = check_fields(fields, &["agreement", "supplier", "creator"])?;
        let mut params = Params::new();
        params.push_opt("creatorId", creator_id);
        params.push_opt("supplierId", supplier_id);
        params.push_opt("agreementId", agreement_id);
        params.push_opt("status", status);
        params.push_opt("dateStart", date_start.as_ref().map(|d| d.to_ts()));
        params.push_opt("dateEnd", date_end.as_ref().map(|d| d.to_ts()));
        params.push_opt("skip", skip);
        params.push_opt("limit", limit);
        params.push_opt("fields", fields);
        self.client.get("cp/ts/goodReceipts/getPositions", params).await
    }

    /// POST cp/ts/goodReceipts/update
    ///
    /// The supplier shipment date travels in the `cp` date format.
    pub async fn update(
        &self,
        id: i64,
        sup_number: Option<&str>,
        sup_shipment_date: Option<DateTimeArg>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        params.push_opt("supNumber", sup_number);
        params.push_opt(
            "supShipmentDate",
            sup_shipment_date.as_ref().map(|d| d.to_cp()),
        );
        self.client.post_form("cp/ts/goodReceipts/update", params).await
    }

    /// POST cp/ts/goodReceipts/changeStatus
    pub async fn change_status(&self, id: i64, status: i64) -> Result<Value> {
        check_range("status", Some(status), 1..=3)?;
        let mut params = Params::new();
        params.push("id", id);
        params.push("status", status);
        self.client
            .post_form("cp/ts/goodReceipts/changeStatus", params)
            .await
    }

    /// POST cp/ts/goodReceipts/delete
    pub async fn delete(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client.post_form("cp/ts/goodReceipts/delete", params).await
    }

    /// POST cp/ts/goodReceipts/createPosition
    pub async fn create_position(
        &self,
        op_id: i64,
        loc_id: i64,
        product_id: i64,
        data: &GrPositionData,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("opId", op_id);
        params.push("locId", loc_id);
        params.push("productId", product_id);
        data.fill(&mut params)?;
        self.client
            .post_form("cp/ts/goodReceipts/createPosition", params)
            .await
    }

    /// POST cp/ts/goodReceipts/deletePosition
    pub async fn delete_position(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client
            .post_form("cp/ts/goodReceipts/deletePosition", params)
            .await
    }

    /// GET cp/ts/goodReceipts/getPosition?id=…
    pub async fn get_position(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client.get("cp/ts/goodReceipts/getPosition", params).await
    }

    /// POST cp/ts/goodReceipts/updatePosition
    pub async fn update_position(&self, id: i64, data: &GrPositionData) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        data.fill(&mut params)?;
        self.client
            .post_form("cp/ts/goodReceipts/updatePosition", params)
            .await
    }
}

/// Operation tags.
pub struct Tags<'a> {
    client: &'a AbcpClient,
}

impl Tags<'_> {
    /// GET cp/ts/tags/list
    pub async fn list(&self, ids: Option<&[i64]>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt_csv("ids", ids);
        self.client.get("cp/ts/tags/list", params).await
    }

    /// POST cp/ts/tags/create
    ///
    /// The color is a six-digit hex value, with or without the leading `#`.
    pub async fn create(&self, name: &str, color: &str) -> Result<Value> {
        let hex = color.strip_prefix('#').unwrap_or(color);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AbcpError::wrong_parameter(
                "color",
                format!("must be a six-digit hex value, got {color:?}"),
            ));
        }
        let mut params = Params::new();
        params.push("name", name);
        params.push("color", format!("#{hex}"));
        self.client.post_form("cp/ts/tags/create", params).await
    }

    /// POST cp/ts/tags/delete
    pub async fn delete(&self, id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        self.client.post_form("cp/ts/tags/delete", params).await
    }
}

/// Links between tags and operations.
pub struct TagsRelationships<'a> {
    client: &'a AbcpClient,
}

impl TagsRelationships<'_> {
    /// GET cp/ts/tagsRelationships/list
    pub async fn list(
        &self,
        object_ids: Option<&[i64]>,
        object_type: Option<i64>,
        group_by_object_id: Option<bool>,
        with_all_tags: Option<bool>,
        tags_ids: Option<&[i64]>,
    ) -> Result<Value> {
        check_range("objectType", object_type, 1..=13)?;
        if with_all_tags == Some(true) && tags_ids.is_none() {
            return Err(AbcpError::ParameterRequired(
                "tagsIds when withAllTags is set".into(),
            ));
        }
        let mut params = Params::new();
        params.push_opt_csv("objectIds", object_ids);
        params.push_opt("objectType", object_type);
        params.push_opt_flag("groupByObjectId", group_by_object_id);
        params.push_opt_flag("withAllTags", with_all_tags);
        params.push_opt_csv("tagsIds", tags_ids);
        self.client.get("cp/ts/tagsRelationships/list", params).await
    }

    /// POST cp/ts/tagsRelationships/create
    pub async fn create(&self, tag_id: i64, object_id: i64, object_type: i64) -> Result<Value> {
        check_range("objectType", Some(object_type), 1..=13)?;
        let mut params = Params::new();
        params.push("tagId", tag_id);
        params.push("objectId", object_id);
        params.push("objectType", object_type);
        self.client
            .post_form("cp/ts/tagsRelationships/create", params)
            .await
    }

    /// POST cp/ts/tagsRelationships/delete
    pub async fn delete(&self, tag_id: i64, object_id: i64, object_type: i64) -> Result<Value> {
        check_range("objectType", Some(object_type), 1..=13)?;
        let mut params = Params::new();
        params.push("tagId", tag_id);
        params.push("objectId", object_id);
        params.push("objectType", object_type);
        self.client
            .post_form("cp/ts/tagsRelationships/delete", params)
            .await
    }
}

/// Payments between the shop and its contractors.
pub struct Payments<'a> {
    client: &'a AbcpClient,
}

impl Payments<'_> {
    /// GET cp/ts/payments/list
    pub async fn get_list(&self, filter: &TsPaymentsFilter) -> Result<Value> {
        self.client
            .get("cp/ts/payments/list", filter.params()?)
            .await
    }

    /// POST cp/ts/payments/create
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        payment_type: &str,
        payment_method_id: i64,
        agreement_id: i64,
        author_id: i64,
        amount: Decimal,
        date: DateTimeArg,
        contractor_id: Option<i64>,
        commission: Option<Decimal>,
        comment: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("paymentType", payment_type);
        params.push("paymentMethodId", payment_method_id);
        params.push("agreementId", agreement_id);
        params.push("authorId", author_id);
        params.push("amount", amount);
        params.push("date", date.to_ts());
        params.push_opt("contractorId", contractor_id);
        params.push_opt("commission", commission);
        params.push_opt("comment", comment);
        params.push_opt_csv("fields", fields);
        self.client.post_form("cp/ts/payments/create", params).await
    }

    /// POST cp/ts/payments/update
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        payment_id: i64,
        agreement_id: Option<i64>,
        amount: Option<Decimal>,
        date: Option<DateTimeArg>,
        status: Option<&str>,
        payment_order: Option<&str>,
        commission: Option<Decimal>,
        comment: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("paymentId", payment_id);
        params.push_opt("agreementId", agreement_id);
        params.push_opt("amount", amount);
        params.push_opt("date", date.as_ref().map(|d| d.to_ts()));
        params.push_opt("status", status);
        params.push_opt("paymentOrder", payment_order);
        params.push_opt("commission", commission);
        params.push_opt("comment", comment);
        params.push_opt_csv("fields", fields);
        self.client.post_form("cp/ts/payments/update", params).await
    }
}

/// Payment method dictionary.
pub struct PaymentMethods<'a> {
    client: &'a AbcpClient,
}

impl PaymentMethods<'_> {
    /// GET cp/ts/paymentMethods/list
    pub async fn get_list(
        &self,
        payment_type: Option<&str>,
        allow_change_payment: Option<&str>,
        state: Option<&str>,
    ) -> Result<Value> {
        check_one_of(
            "allowChangePayment",
            allow_change_payment,
            &["yes", "no", "paymentInterfaceOnly", "editOnly"],
        )?;
        let mut params = Params::new();
        params.push_opt("paymentType", payment_type);
        params.push_opt("allowChangePayment", allow_change_payment);
        params.push_opt("state", state);
        self.client.get("cp/ts/paymentMethods/list", params).await
    }
}

/// Contract agreements, shop side.
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

/// Legal person dictionary.
pub struct LegalPersons<'a> {
    client: &'a AbcpClient,
}

impl LegalPersons<'_> {
    /// GET cp/ts/legalPersons/list
    ///
    /// Pagination here uses `offset`, not `skip`.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_list(
        &self,
        ids: Option<&[i64]>,
        contractor_id: Option<i64>,
        form: Option<i64>,
        org_type: Option<i64>,
        agreement_with_individuals_required: Option<bool>,
        with_tax_systems: Option<bool>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Value> {
        check_limit(limit)?;
        let mut params = Params::new();
        params.push_opt_csv("ids", ids);
        params.push_opt("contractorId", contractor_id);
        params.push_opt("form", form);
        params.push_opt("orgType", org_type);
        params.push_opt_flag(
            "agreementWithIndividualsRequired",
            agreement_with_individuals_required,
        );
        params.push_opt_flag("withTaxSystems", with_tax_systems);
        params.push_opt("limit", limit);
        params.push_opt("offset", offset);
        self.client.get("cp/ts/legalPersons/list", params).await
    }
}

/// Orders placed by the shop with its suppliers.
pub struct SupplierOrders<'a> {
    client: &'a AbcpClient,
}

impl SupplierOrders<'_> {
    /// POST cp/ts/supplierOrders/orders/list
    pub async fn orders_list(&self, filter: &SupplierOrdersFilter) -> Result<Value> {
        self.client
            .post_form("cp/ts/supplierOrders/orders/list", filter.params()?)
            .await
    }

    /// POST cp/ts/supplierOrders/positions/list
    pub async fn positions_list(&self, filter: &SupplierOrderPositionsFilter) -> Result<Value> {
        self.client
            .post_form("cp/ts/supplierOrders/positions/list", filter.params()?)
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
    use crate::types::requests::{OrderPickingsFilter, SupplierReturnPositionsFilter};

    fn json_ok(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    async fn admin(server: &MockServer) -> AbcpClient {
        let base = url::Url::parse(&server.uri())
            .and_then(|u| u.join("/"))
            .unwrap();
        AbcpClient::with_config_and_base_url(
            "id1886.public.api.abcp.ru",
            "api@id1886",
            "1c7c0b3b8ab2eb1eafb0f1c91ceb3e97",
            ClientConfig::default(),
            base,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_admin_refused_for_client_login() {
        let server = MockServer::start().await;
        let base = url::Url::parse(&server.uri())
            .and_then(|u| u.join("/"))
            .unwrap();
        let client = AbcpClient::with_config_and_base_url(
            "id1886.public.api.abcp.ru",
            "89031234567",
            "1c7c0b3b8ab2eb1eafb0f1c91ceb3e97",
            ClientConfig::default(),
            base,
        )
        .unwrap();
        assert!(matches!(
            client.ts().admin().err(),
            Some(AbcpError::NotEnoughRights { .. })
        ));
    }

    #[tokio::test]
    async fn test_return_positions_filter_rejects_unknown_field() {
        let server = MockServer::start().await;
        let client = admin(&server).await;
        let filter = SupplierReturnPositionsFilter {
            fields: Some(vec!["warehouse".into()]),
            ..Default::default()
        };
        let err = client
            .ts()
            .admin()
            .unwrap()
            .supplier_returns()
            .positions()
            .get_list(&filter)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::WrongParameter { .. }));
    }

    #[tokio::test]
    async fn test_return_positions_create_multiple_flattens_poses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/ts/supplierReturns/positions/createMultiple"))
            .and(body_string_contains("opId=4"))
            .and(body_string_contains("posesData%5B0%5D%5BgoodsReceiptPosId%5D=11"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .ts()
            .admin()
            .unwrap()
            .supplier_returns()
            .positions()
            .create_multiple(4, &[json!({"goodsReceiptPosId": 11, "quantity": 1})])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_order_pickings_listing_travels_as_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/ts/orderPickings/get"))
            .and(body_string_contains("statuses=1%2C2"))
            .respond_with(json_ok(json!([])))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        let filter = OrderPickingsFilter {
            statuses: Some(vec![1, 2]),
            ..Default::default()
        };
        client
            .ts()
            .admin()
            .unwrap()
            .order_pickings()
            .get(&filter)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fast_get_out_sends_positions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/ts/orderPickings/fastGetOut"))
            .and(body_string_contains("positions%5B0%5D%5BitemId%5D=7"))
            .and(body_string_contains("clientId=33"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .ts()
            .admin()
            .unwrap()
            .order_pickings()
            .fast_get_out(
                33,
                5,
                &[json!({"itemId": 7, "quantity": 2})],
                None,
                None,
                None,
                None,
                None,
                None,
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cart_update_requires_exactly_one_owner() {
        let server = MockServer::start().await;
        let client = admin(&server).await;
        let admin_api = client.ts().admin().unwrap();
        let cart = admin_api.cart();

        let err = cart
            .update(7, 2.0, None, None, None, None, None, None, None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::ParameterRequired(_)));

        let err = cart
            .update(
                7,
                2.0,
                Some(33),
                Some(44),
                None,
                None,
                None,
                None,
                None,
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::ParameterRequired(_)));
    }

    #[tokio::test]
    async fn test_cart_delete_uses_indexed_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/ts/cart/delete"))
            .and(body_string_contains("positionIds%5B0%5D=4"))
            .and(body_string_contains("positionIds%5B1%5D=5"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .ts()
            .admin()
            .unwrap()
            .cart()
            .delete_positions(&[4, 5], Some(33), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_position_message_date_uses_cp_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/ts/positions/message/create"))
            .and(body_string_contains("date=2024-03-05+12%3A00%3A00"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        client
            .ts()
            .admin()
            .unwrap()
            .positions_messages()
            .create(9, "supplier confirmed", None, Some(date.into()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_tag_color_normalized_to_hash_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/ts/tags/create"))
            .and(body_string_contains("color=%23ff0000"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        let admin_api = client.ts().admin().unwrap();
        let tags = admin_api.tags();
        tags.create("urgent", "ff0000").await.unwrap();

        let err = tags.create("urgent", "red").await.unwrap_err();
        assert!(matches!(err, AbcpError::WrongParameter { .. }));
    }

    #[tokio::test]
    async fn test_tags_relationships_with_all_tags_needs_ids() {
        let server = MockServer::start().await;
        let client = admin(&server).await;
        let err = client
            .ts()
            .admin()
            .unwrap()
            .tags_relationships()
            .list(None, Some(3), None, Some(true), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::ParameterRequired(_)));
    }

    #[tokio::test]
    async fn test_legal_persons_paginates_with_offset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cp/ts/legalPersons/list"))
            .and(query_param("offset", "40"))
            .and(query_param("limit", "20"))
            .respond_with(json_ok(json!([])))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .ts()
            .admin()
            .unwrap()
            .legal_persons()
            .get_list(None, None, None, None, None, None, Some(20), Some(40))
            .await
            .unwrap();
    }
}
