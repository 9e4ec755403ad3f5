/*
[INPUT]:  Administrative filters, order and payment payloads, price lists
[OUTPUT]: JSON responses from the cp administrative endpoints
[POS]:    cp admin namespace - orders, finance, users, staff, distributors, catalogs
[UPDATE]: When the vendor extends the administrative API surface
*/

use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::http::client::{AbcpClient, UploadFile};
use crate::http::dates::DateTimeArg;
use crate::http::error::{AbcpError, Result};
use crate::http::params::{Params, check_limit, check_one_of, check_range};
use crate::types::requests::{
    CreateUser, EditUser, OrdersListFilter, ReceiptsFilter, RouteUpdate, SaveOrder,
    UsersListFilter,
};

/// Administrative cp methods. Handed out by [`crate::cp::Cp::admin`], which
/// refuses client credentials.
pub struct CpAdmin<'a> {
    client: &'a AbcpClient,
}

impl<'a> CpAdmin<'a> {
    pub(crate) fn new(client: &'a AbcpClient) -> Self {
        Self { client }
    }

    pub fn orders(&self) -> Orders<'a> {
        Orders { client: self.client }
    }

    pub fn finance(&self) -> Finance<'a> {
        Finance { client: self.client }
    }

    pub fn users(&self) -> Users<'a> {
        Users { client: self.client }
    }

    pub fn staff(&self) -> Staff<'a> {
        Staff { client: self.client }
    }

    pub fn statuses(&self) -> Statuses<'a> {
        Statuses { client: self.client }
    }

    pub fn articles(&self) -> Articles<'a> {
        Articles { client: self.client }
    }

    pub fn distributors(&self) -> Distributors<'a> {
        Distributors { client: self.client }
    }

    pub fn catalog(&self) -> Catalog<'a> {
        Catalog { client: self.client }
    }

    pub fn users_catalog(&self) -> UsersCatalog<'a> {
        UsersCatalog { client: self.client }
    }

    pub fn payment(&self) -> Payment<'a> {
        Payment { client: self.client }
    }
}

/// Order management across all customers of the shop.
pub struct Orders<'a> {
    client: &'a AbcpClient,
}

impl Orders<'_> {
    /// GET cp/orders
    pub async fn get_orders_list(&self, filter: &OrdersListFilter) -> Result<Value> {
        self.client.get("cp/orders", filter.params()?).await
    }

    /// GET cp/order?number=… | ?internalNumber=…
    pub async fn get_order(
        &self,
        number: Option<&str>,
        internal_number: Option<&str>,
        with_deleted: Option<bool>,
        format: Option<&str>,
    ) -> Result<Value> {
        if number.is_none() && internal_number.is_none() {
            return Err(AbcpError::ParameterRequired(
                "number or internalNumber".into(),
            ));
        }
        let mut params = Params::new();
        params.push_opt("number", number);
        params.push_opt("internalNumber", internal_number);
        params.push_opt_flag("withDeleted", with_deleted);
        params.push_opt("format", format);
        self.client.get("cp/order", params).await
    }

    /// GET cp/order/statusHistory?positionId=…
    pub async fn status_history(&self, position_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("positionId", position_id);
        self.client.get("cp/order/statusHistory", params).await
    }

    /// POST cp/order
    pub async fn create_or_edit_order(&self, order: &SaveOrder) -> Result<Value> {
        self.client.post_form("cp/order", order.params()?).await
    }

    /// GET cp/orders/online?positionIds[…]=…
    pub async fn get_online_order_params(&self, position_ids: &[i64]) -> Result<Value> {
        let mut params = Params::new();
        params.push_indexed("positionIds", position_ids);
        self.client.get("cp/orders/online", params).await
    }

    /// POST cp/orders/online
    ///
    /// `order_params` is one object flattened to `orderParams[key]`; each
    /// position carries an `id` plus its own params under
    /// `positions[i][positionParams][key]`.
    pub async fn send_online_order(
        &self,
        order_params: &Value,
        positions: &[Value],
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_object("orderParams", order_params);
        for (i, pos) in positions.iter().enumerate() {
            if let Some(map) = pos.as_object() {
                for (k, v) in map {
                    let key = if k == "id" {
                        format!("positions[{i}][id]")
                    } else {
                        format!("positions[{i}][positionParams][{k}]")
                    };
                    params.push(&key, render(v));
                }
            }
        }
        self.client.post_form("cp/orders/online", params).await
    }
}

fn render(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Balances, payments and fiscal receipts.
pub struct Finance<'a> {
    client: &'a AbcpClient,
}

impl Finance<'_> {
    /// POST cp/finance/userBalance
    pub async fn update_balance(
        &self,
        user_id: i64,
        balance: Decimal,
        in_stop_list: Option<bool>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("userId", user_id);
        params.push("balance", balance);
        params.push_opt_flag("inStopList", in_stop_list);
        self.client.post_form("cp/finance/userBalance", params).await
    }

    /// POST cp/finance/creditLimit
    pub async fn update_credit_limit(
        &self,
        user_id: i64,
        credit_limit: Decimal,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("userId", user_id);
        params.push("creditLimit", credit_limit);
        self.client.post_form("cp/finance/creditLimit", params).await
    }

    /// POST cp/finance/userInfo
    pub async fn update_finance_info(
        &self,
        user_id: i64,
        balance: Option<Decimal>,
        credit_limit: Option<Decimal>,
        in_stop_list: Option<bool>,
        pay_delay: Option<i64>,
        overdue_saldo: Option<Decimal>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("userId", user_id);
        params.push_opt("balance", balance);
        params.push_opt("creditLimit", credit_limit);
        params.push_opt_flag("inStopList", in_stop_list);
        params.push_opt("payDelay", pay_delay);
        params.push_opt("overdueSaldo", overdue_saldo);
        self.client.post_form("cp/finance/userInfo", params).await
    }

    /// GET cp/finance/payments
    ///
    /// Takes either a payment number alone or a full creation date window.
    pub async fn get_payments_info(
        &self,
        user_id: Option<i64>,
        payment_number: Option<&str>,
        create_date_time_start: Option<DateTimeArg>,
        create_date_time_end: Option<DateTimeArg>,
    ) -> Result<Value> {
        if user_id.is_none()
            && payment_number.is_none()
            && create_date_time_start.is_none()
            && create_date_time_end.is_none()
        {
            return Err(AbcpError::ParameterRequired(
                "paymentNumber or a date window".into(),
            ));
        }
        if payment_number.is_none()
            && (create_date_time_start.is_none() || create_date_time_end.is_none())
        {
            return Err(AbcpError::ParameterRequired(
                "both createDateTimeStart and createDateTimeEnd".into(),
            ));
        }
        let mut params = Params::new();
        params.push_opt("userId", user_id);
        params.push_opt("paymentNumber", payment_number);
        params.push_opt(
            "createDateTimeStart",
            create_date_time_start.as_ref().map(|d| d.to_cp()),
        );
        params.push_opt(
            "createDateTimeEnd",
            create_date_time_end.as_ref().map(|d| d.to_cp()),
        );
        self.client.get("cp/finance/payments", params).await
    }

    /// GET cp/finance/paymentOrderLinks
    pub async fn get_payment_links(
        &self,
        payment_numbers: Option<&[i64]>,
        order_ids: Option<&[i64]>,
        user_id: Option<i64>,
        date_time_start: Option<DateTimeArg>,
        date_time_end: Option<DateTimeArg>,
    ) -> Result<Value> {
        if user_id.is_none()
            && date_time_start.is_none()
            && date_time_end.is_none()
            && payment_numbers.is_none()
            && order_ids.is_none()
        {
            return Err(AbcpError::ParameterRequired(
                "userId, a date window, paymentNumbers or orderIds".into(),
            ));
        }
        let mut params = Params::new();
        params.push_opt_indexed("paymentNumbers", payment_numbers);
        params.push_opt_indexed("orderIds", order_ids);
        params.push_opt("userId", user_id);
        params.push_opt(
            "dateTimeStart",
            date_time_start.as_ref().map(|d| d.to_cp()),
        );
        params.push_opt("dateTimeEnd", date_time_end.as_ref().map(|d| d.to_cp()));
        self.client.get("cp/finance/paymentOrderLinks", params).await
    }

    /// GET cp/onlinePayments
    ///
    /// All conditions travel inside a `filter[…]` envelope.
    pub async fn get_online_payments(
        &self,
        date_start: Option<DateTimeArg>,
        date_end: Option<DateTimeArg>,
        customer_ids: Option<&[i64]>,
        payment_method_id: Option<i64>,
        status_ids: Option<&[i64]>,
        order_ids: Option<&[i64]>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("filter[dateStart]", date_start.as_ref().map(|d| d.to_cp()));
        params.push_opt("filter[dateEnd]", date_end.as_ref().map(|d| d.to_cp()));
        params.push_opt_indexed("filter[customerIds]", customer_ids);
        params.push_opt("filter[paymentMethodId]", payment_method_id);
        params.push_opt_indexed("filter[statusIds]", status_ids);
        params.push_opt_indexed("filter[orderIds]", order_ids);
        self.client.get("cp/onlinePayments", params).await
    }

    /// POST cp/finance/payments
    ///
    /// Each payment object is flattened to `payments[i][key]`.
    pub async fn add_multiple_payments(
        &self,
        payments: &[Value],
        link_payments: Option<bool>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_objects("payments", payments);
        params.push_opt_flag("linkPayments", link_payments);
        self.client.post_form("cp/finance/payments", params).await
    }

    /// POST cp/finance/payments with a single `payments[0]` entry.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_single_payment(
        &self,
        user_id: i64,
        payment_type_id: i64,
        amount: Decimal,
        create_date_time: Option<DateTimeArg>,
        payment_number: Option<&str>,
        comment: Option<&str>,
        editor_id: Option<i64>,
        link_payments: Option<bool>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("payments[0][userId]", user_id);
        params.push("payments[0][paymentTypeId]", payment_type_id);
        params.push("payments[0][amount]", amount);
        params.push_opt(
            "payments[0][createDateTime]",
            create_date_time.as_ref().map(|d| d.to_cp()),
        );
        params.push_opt("payments[0][paymentNumber]", payment_number);
        params.push_opt("payments[0][comment]", comment);
        params.push_opt("payments[0][editorId]", editor_id);
        params.push_opt_flag("linkPayments", link_payments);
        self.client.post_form("cp/finance/payments", params).await
    }

    /// POST cp/finance/deleteLinkPayments
    pub async fn delete_link_payment(&self, payment_link_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("paymentLinkId", payment_link_id);
        self.client
            .post_form("cp/finance/deleteLinkPayments", params)
            .await
    }

    /// POST cp/finance/paymentOrderLink
    pub async fn link_existing_payment(
        &self,
        payment_id: i64,
        order_id: i64,
        amount: Decimal,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("paymentId", payment_id);
        params.push("orderId", order_id);
        params.push("amount", amount);
        self.client
            .post_form("cp/finance/paymentOrderLink", params)
            .await
    }

    /// POST cp/finance/paymentRefund
    pub async fn refund_payment(
        &self,
        refund_payment_id: i64,
        refund_amount: Decimal,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("refundPaymentId", refund_payment_id);
        params.push("refundAmount", refund_amount);
        self.client.post_form("cp/finance/paymentRefund", params).await
    }

    /// POST cp/finance/deletePayments
    pub async fn delete_payment(
        &self,
        payment_id: i64,
        delete_link: Option<bool>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("paymentId", payment_id);
        params.push_opt_flag("deleteLink", delete_link);
        self.client.post_form("cp/finance/deletePayments", params).await
    }

    /// GET komtet/getChecks
    pub async fn get_receipts(&self, filter: &ReceiptsFilter) -> Result<Value> {
        self.client.get("komtet/getChecks", filter.params()).await
    }

    /// GET cp/payments/getPaymentMethodSettings
    pub async fn get_payments_methods(
        &self,
        only_enabled: Option<bool>,
        only_disabled: Option<bool>,
        payment_method_id: Option<i64>,
    ) -> Result<Value> {
        if only_enabled.is_some() && only_disabled.is_some() {
            return Err(AbcpError::wrong_parameter(
                "onlyEnabled",
                "onlyEnabled and onlyDisabled are mutually exclusive",
            ));
        }
        let mut params = Params::new();
        params.push_opt_flag("onlyEnabled", only_enabled);
        params.push_opt_flag("onlyDisabled", only_disabled);
        params.push_opt("paymentMethodId", payment_method_id);
        self.client
            .get("cp/payments/getPaymentMethodSettings", params)
            .await
    }
}

/// Customer accounts, pricing profiles and shipment address zones.
pub struct Users<'a> {
    client: &'a AbcpClient,
}

impl Users<'_> {
    /// GET cp/users
    pub async fn get_users(&self, filter: &UsersListFilter) -> Result<Value> {
        self.client.get("cp/users", filter.params()?).await
    }

    /// POST cp/user/new
    pub async fn create(&self, user: &CreateUser) -> Result<Value> {
        self.client.post_form("cp/user/new", user.params()?).await
    }

    /// GET cp/users/profiles
    pub async fn get_profiles(
        &self,
        profile_id: Option<i64>,
        skip: Option<i64>,
        limit: Option<i64>,
        format: Option<&str>,
    ) -> Result<Value> {
        check_one_of("format", format, &["brands", "distributors"])?;
        check_limit(limit)?;
        let mut params = Params::new();
        params.push_opt("profileId", profile_id);
        params.push_opt("skip", skip);
        params.push_opt("limit", limit);
        params.push_opt("format", format);
        self.client.get("cp/users/profiles", params).await
    }

    /// POST cp/users/profile
    #[allow(clippy::too_many_arguments)]
    pub async fn edit_profile(
        &self,
        profile_id: i64,
        code: Option<&str>,
        name: Option<&str>,
        comment: Option<&str>,
        price_up: Option<Decimal>,
        payment_methods: Option<&str>,
        matrix_price_ups: Option<&[Value]>,
        distributors_price_ups: Option<&[Value]>,
    ) -> Result<Value> {
        if code.is_none()
            && name.is_none()
            && comment.is_none()
            && price_up.is_none()
            && payment_methods.is_none()
            && matrix_price_ups.is_none()
            && distributors_price_ups.is_none()
        {
            return Err(AbcpError::ParameterRequired(
                "at least one profile field".into(),
            ));
        }
        let mut params = Params::new();
        params.push("profileId", profile_id);
        params.push_opt("code", code);
        params.push_opt("name", name);
        params.push_opt("comment", comment);
        params.push_opt("priceUp", price_up);
        params.push_opt("paymentMethods", payment_methods);
        params.push_opt_objects("matrixPriceUps", matrix_price_ups);
        params.push_opt_objects("distributorsPriceUps", distributors_price_ups);
        self.client.post_form("cp/users/profile", params).await
    }

    /// POST cp/user
    pub async fn edit(&self, user: &EditUser) -> Result<Value> {
        self.client.post_form("cp/user", user.params()).await
    }

    /// GET cp/user/shipmentAddresses?userId=…
    pub async fn get_user_shipment_address(&self, user_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("userId", user_id);
        self.client.get("cp/user/shipmentAddresses", params).await
    }

    /// GET cp/user/shipmentAddressZones
    pub async fn get_shipment_address_zones(&self) -> Result<Value> {
        self.client
            .get("cp/user/shipmentAddressZones", Params::new())
            .await
    }

    /// GET cp/user/shipmentAddressZones/{id}
    pub async fn get_shipment_address_zone(&self, id: i64) -> Result<Value> {
        self.client
            .get(&format!("cp/user/shipmentAddressZones/{id}"), Params::new())
            .await
    }

    /// POST cp/user/shipmentAddressZones
    ///
    /// Each zone object is flattened to `zones[i][key]`.
    pub async fn update_shipment_zones(&self, zones: &[Value]) -> Result<Value> {
        let mut params = Params::new();
        params.push_objects("zones", zones);
        self.client
            .post_form("cp/user/shipmentAddressZones", params)
            .await
    }

    /// POST cp/user/shipmentAddressZones/new (JSON body)
    #[allow(clippy::too_many_arguments)]
    pub async fn create_shipment_zone(
        &self,
        name: &str,
        desc: &str,
        address: &str,
        comment: &str,
        lat: f64,
        lng: f64,
        radius: f64,
    ) -> Result<Value> {
        let body = json!({
            "name": name,
            "desc": desc,
            "address": address,
            "comment": comment,
            "lat": lat,
            "lng": lng,
            "radius": radius,
        });
        self.client
            .post_json("cp/user/shipmentAddressZones/new", body)
            .await
    }

    /// POST cp/user/shipmentAddressZones/{id}/update (JSON body)
    #[allow(clippy::too_many_arguments)]
    pub async fn update_shipment_zone(
        &self,
        shipment_zone_id: i64,
        name: Option<&str>,
        desc: Option<&str>,
        address: Option<&str>,
        comment: Option<&str>,
        lat: Option<f64>,
        lng: Option<f64>,
        radius: Option<f64>,
    ) -> Result<Value> {
        let mut body = serde_json::Map::new();
        if let Some(v) = name {
            body.insert("name".into(), v.into());
        }
        if let Some(v) = desc {
            body.insert("desc".into(), v.into());
        }
        if let Some(v) = address {
            body.insert("address".into(), v.into());
        }
        if let Some(v) = comment {
            body.insert("comment".into(), v.into());
        }
        if let Some(v) = lat {
            body.insert("lat".into(), v.into());
        }
        if let Some(v) = lng {
            body.insert("lng".into(), v.into());
        }
        if let Some(v) = radius {
            body.insert("radius".into(), v.into());
        }
        self.client
            .post_json(
                &format!("cp/user/shipmentAddressZones/{shipment_zone_id}/update"),
                Value::Object(body),
            )
            .await
    }

    /// POST cp/user/shipmentAddress/{id}/delete
    pub async fn delete_shipment_zone(&self, id: i64) -> Result<Value> {
        self.client
            .post_form(&format!("cp/user/shipmentAddress/{id}/delete"), Params::new())
            .await
    }

    /// GET cp/garage
    pub async fn get_updated_cars(
        &self,
        date_updated_start: Option<DateTimeArg>,
        date_updated_end: Option<DateTimeArg>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt(
            "dateUpdatedStart",
            date_updated_start.as_ref().map(|d| d.to_cp()),
        );
        params.push_opt(
            "dateUpdatedEnd",
            date_updated_end.as_ref().map(|d| d.to_cp()),
        );
        self.client.get("cp/garage", params).await
    }

    /// GET cp/user/smsSettings?userIds[…]=…
    pub async fn get_sms_settings(&self, user_ids: &[i64]) -> Result<Value> {
        let mut params = Params::new();
        params.push_indexed("userIds", user_ids);
        self.client.get("cp/user/smsSettings", params).await
    }
}

/// Shop employees.
pub struct Staff<'a> {
    client: &'a AbcpClient,
}

impl Staff<'_> {
    /// GET cp/managers
    pub async fn get(&self) -> Result<Value> {
        self.client.get("cp/managers", Params::new()).await
    }

    /// POST cp/manager
    #[allow(clippy::too_many_arguments)]
    pub async fn update_manager(
        &self,
        id: i64,
        type_id: Option<i64>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        mobile: Option<&str>,
        sip: Option<i64>,
        comment: Option<&str>,
        boss_id: Option<i64>,
        office_id: Option<i64>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("id", id);
        params.push_opt("typeId", type_id);
        params.push_opt("firstName", first_name);
        params.push_opt("lastName", last_name);
        params.push_opt("email", email);
        params.push_opt("phone", phone);
        params.push_opt("mobile", mobile);
        params.push_opt("sip", sip);
        params.push_opt("comment", comment);
        params.push_opt("bossId", boss_id);
        params.push_opt("officeId", office_id);
        self.client.post_form("cp/manager", params).await
    }
}

/// Order status dictionary.
pub struct Statuses<'a> {
    client: &'a AbcpClient,
}

impl Statuses<'_> {
    /// GET cp/statuses
    pub async fn get(&self) -> Result<Value> {
        self.client.get("cp/statuses", Params::new()).await
    }
}

/// Brand dictionaries.
pub struct Articles<'a> {
    client: &'a AbcpClient,
}

impl Articles<'_> {
    /// GET cp/articles/brands
    pub async fn get_brands(&self) -> Result<Value> {
        self.client.get("cp/articles/brands", Params::new()).await
    }

    /// GET cp/articles/brandsGroup
    pub async fn get_brand_group(&self) -> Result<Value> {
        self.client.get("cp/articles/brandsGroup", Params::new()).await
    }
}

/// Suppliers, their routes and price lists.
pub struct Distributors<'a> {
    client: &'a AbcpClient,
}

impl Distributors<'_> {
    /// GET cp/distributors
    pub async fn get(&self, distributors4mc: Option<bool>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt_flag("distributors4mc", distributors4mc);
        self.client.get("cp/distributors", params).await
    }

    /// POST cp/distributor/status
    pub async fn edit_status(&self, distributor_id: i64, status: bool) -> Result<Value> {
        let mut params = Params::new();
        params.push("distributorId", distributor_id);
        params.push("status", if status { "1" } else { "0" });
        self.client.post_form("cp/distributor/status", params).await
    }

    /// GET cp/routes?distributorId=…
    pub async fn get_routes(&self, distributor_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("distributorId", distributor_id);
        self.client.get("cp/routes", params).await
    }

    /// POST cp/route
    pub async fn edit_route(&self, route: &RouteUpdate) -> Result<Value> {
        self.client.post_form("cp/route", route.params()).await
    }

    /// POST cp/routes/status
    pub async fn edit_route_status(&self, route_id: i64, status: bool) -> Result<Value> {
        let mut params = Params::new();
        params.push("routeId", route_id);
        params.push("status", if status { "1" } else { "0" });
        self.client.post_form("cp/routes/status", params).await
    }

    /// POST cp/route/delete
    pub async fn delete_route(&self, route_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("routeId", route_id);
        self.client.post_form("cp/route/delete", params).await
    }

    /// POST cp/offices
    ///
    /// Each distributor object is flattened to `distributors[i][key]`.
    pub async fn connect_to_office(
        &self,
        office_id: i64,
        distributors: &[Value],
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("officeId", office_id);
        params.push_objects("distributors", distributors);
        self.client.post_form("cp/offices", params).await
    }

    /// GET cp/offices
    pub async fn get_office_distributors(&self, office_id: Option<i64>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("officeId", office_id);
        self.client.get("cp/offices", params).await
    }

    /// POST cp/distributor/pricelistUpdate (multipart)
    pub async fn pricelist_update(
        &self,
        distributor_id: i64,
        upload_file: UploadFile,
        file_type_id: Option<i64>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("distributorId", distributor_id);
        params.push_opt("fileTypeId", file_type_id);
        self.client
            .post_multipart("cp/distributor/pricelistUpdate", params, upload_file)
            .await
    }
}

/// Vendor-curated catalogs.
pub struct Catalog<'a> {
    client: &'a AbcpClient,
}

impl Catalog<'_> {
    /// GET cp/catalog/info?goodsGroup=…
    pub async fn info(&self, goods_group: &str, locale: Option<&str>) -> Result<Value> {
        let mut params = Params::new();
        params.push("goodsGroup", goods_group);
        params.push("locale", locale.unwrap_or("ru_RU"));
        self.client.get("cp/catalog/info", params).await
    }

    /// POST cp/catalog/search
    ///
    /// Each property object is flattened to `properties[i][key]`.
    pub async fn search(
        &self,
        goods_group: &str,
        properties: &[Value],
        skip: Option<i64>,
        limit: Option<i64>,
        locale: Option<&str>,
    ) -> Result<Value> {
        check_limit(limit)?;
        let mut params = Params::new();
        params.push("goodsGroup", goods_group);
        params.push_objects("properties", properties);
        params.push_opt("skip", skip);
        params.push_opt("limit", limit);
        params.push_opt("locale", locale);
        self.client.post_form("cp/catalog/search", params).await
    }

    /// POST cp/catalog/info/batch
    ///
    /// Each article object carries `brand` and `number` keys.
    pub async fn info_batch(
        &self,
        articles: &[Value],
        locale: Option<&str>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_objects("articles", articles);
        params.push("locale", locale.unwrap_or("ru_RU"));
        self.client.post_form("cp/catalog/info/batch", params).await
    }
}

/// Shop-owned catalogs with file upload.
pub struct UsersCatalog<'a> {
    client: &'a AbcpClient,
}

impl UsersCatalog<'_> {
    /// POST cp/usercatalogs/{id}/upload (multipart)
    ///
    /// `image_archive` is required when `image_upload_mode` is 1.
    #[allow(clippy::too_many_arguments)]
    pub async fn upload(
        &self,
        catalog_id: i64,
        file: UploadFile,
        delete_old_mode: Option<i64>,
        default_attributes_hide: Option<bool>,
        article_only: Option<bool>,
        image_upload_mode: Option<i64>,
        image_archive: Option<UploadFile>,
    ) -> Result<Value> {
        check_range("deleteOldMode", delete_old_mode, 0..=2)?;
        if image_upload_mode == Some(1) && image_archive.is_none() {
            return Err(AbcpError::ParameterRequired(
                "imageArchive when imageUploadMode is 1".into(),
            ));
        }
        let mut params = Params::new();
        params.push_opt("deleteOldMode", delete_old_mode);
        params.push_opt_bool_str("defaultAttributesHide", default_attributes_hide);
        params.push_opt_bool_str("articleOnly", article_only);
        params.push_opt("imageUploadMode", image_upload_mode);
        let extra = image_archive.map(|f| ("imageArchive".to_owned(), f));
        self.client
            .post_multipart_extra(
                &format!("cp/usercatalogs/{catalog_id}/upload"),
                params,
                file,
                extra,
            )
            .await
    }
}

/// Online acquiring helpers.
pub struct Payment<'a> {
    client: &'a AbcpClient,
}

impl Payment<'_> {
    /// GET cp/payment/token?number=…
    pub async fn token(&self, number: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("number", number);
        self.client.get("cp/payment/token", params).await
    }

    /// GET cp/payment/top-balance-link
    pub async fn top_balance_link(&self, client_id: i64, amount: Decimal) -> Result<Value> {
        let mut params = Params::new();
        params.push("clientId", client_id);
        params.push("amount", amount);
        self.client.get("cp/payment/top-balance-link", params).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::client::{AbcpClient, ClientConfig, UploadFile};
    use crate::http::error::AbcpError;
    use crate::types::requests::{OrdersListFilter, SaveOrder};

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
    async fn test_orders_list_sends_indexed_numbers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cp/orders"))
            .and(query_param("numbers[0]", "1042"))
            .and(query_param("dateCreatedStart", "2024-03-05 00:00:00"))
            .respond_with(json_ok(json!([])))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        let filter = OrdersListFilter {
            numbers: Some(vec!["1042".into()]),
            date_created_start: Some("2024-03-05 00:00:00".into()),
            ..Default::default()
        };
        client
            .cp()
            .admin()
            .unwrap()
            .orders()
            .get_orders_list(&filter)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_order_wraps_fields_in_order_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/order"))
            .and(body_string_contains("order%5Bnumber%5D=1042"))
            .and(body_string_contains("order%5BuserId%5D=33"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        let order = SaveOrder {
            number: Some("1042".into()),
            user_id: Some(33),
            ..Default::default()
        };
        client
            .cp()
            .admin()
            .unwrap()
            .orders()
            .create_or_edit_order(&order)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_online_order_position_params_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/orders/online"))
            .and(body_string_contains("orderParams%5Bcomment%5D=asap"))
            .and(body_string_contains("positions%5B0%5D%5Bid%5D=17"))
            .and(body_string_contains(
                "positions%5B0%5D%5BpositionParams%5D%5Bquantity%5D=2",
            ))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .cp()
            .admin()
            .unwrap()
            .orders()
            .send_online_order(
                &json!({"comment": "asap"}),
                &[json!({"id": 17, "quantity": 2})],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_online_payments_filter_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cp/onlinePayments"))
            .and(query_param("filter[customerIds][0]", "7"))
            .and(query_param("filter[paymentMethodId]", "3"))
            .respond_with(json_ok(json!([])))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .cp()
            .admin()
            .unwrap()
            .finance()
            .get_online_payments(None, None, Some(&[7]), Some(3), None, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_single_payment_flattened_to_first_slot() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/finance/payments"))
            .and(body_string_contains("payments%5B0%5D%5BuserId%5D=33"))
            .and(body_string_contains("payments%5B0%5D%5Bamount%5D=1500.50"))
            .and(body_string_contains("linkPayments=1"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .cp()
            .admin()
            .unwrap()
            .finance()
            .add_single_payment(
                33,
                2,
                rust_decimal::Decimal::new(150050, 2),
                None,
                None,
                None,
                None,
                Some(true),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_payments_info_needs_number_or_date_window() {
        let server = MockServer::start().await;
        let client = admin(&server).await;
        let err = client
            .cp()
            .admin()
            .unwrap()
            .finance()
            .get_payments_info(Some(33), None, Some("2024-03-01 00:00:00".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::ParameterRequired(_)));
    }

    #[tokio::test]
    async fn test_payments_methods_flags_are_exclusive() {
        let server = MockServer::start().await;
        let client = admin(&server).await;
        let err = client
            .cp()
            .admin()
            .unwrap()
            .finance()
            .get_payments_methods(Some(true), Some(true), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::WrongParameter { .. }));
    }

    #[tokio::test]
    async fn test_shipment_zone_update_posts_json_to_id_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/user/shipmentAddressZones/5/update"))
            .and(body_string_contains("\"radius\":2.5"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .cp()
            .admin()
            .unwrap()
            .users()
            .update_shipment_zone(5, None, None, None, None, None, None, Some(2.5))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_catalog_upload_requires_archive_for_mode_one() {
        let server = MockServer::start().await;
        let client = admin(&server).await;
        let err = client
            .cp()
            .admin()
            .unwrap()
            .users_catalog()
            .upload(
                9,
                UploadFile::new("catalog.xlsx", vec![1, 2, 3]),
                Some(0),
                None,
                None,
                Some(1),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::ParameterRequired(_)));
    }

    #[tokio::test]
    async fn test_catalog_upload_hits_id_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/usercatalogs/9/upload"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .cp()
            .admin()
            .unwrap()
            .users_catalog()
            .upload(
                9,
                UploadFile::new("catalog.xlsx", vec![1, 2, 3]),
                Some(2),
                Some(true),
                None,
                None,
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_pricelist_update_is_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cp/distributor/pricelistUpdate"))
            .respond_with(json_ok(json!({"status": 1})))
            .mount(&server)
            .await;

        let client = admin(&server).await;
        client
            .cp()
            .admin()
            .unwrap()
            .distributors()
            .pricelist_update(4, UploadFile::new("price.csv", b"a;b;c".to_vec()), Some(1))
            .await
            .unwrap();
    }
}
