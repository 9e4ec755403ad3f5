/*
[INPUT]:  Search queries, basket positions, order and account details
[OUTPUT]: JSON responses from the client-side cp endpoints
[POS]:    cp client namespace - search, basket, orders, user account, garage
[UPDATE]: When the vendor extends the client API surface
*/

use serde_json::{Value, json};

use crate::http::client::AbcpClient;
use crate::http::dates::DateTimeArg;
use crate::http::error::{AbcpError, Result};
use crate::http::params::{Params, check_flags, check_limit, check_one_of};
use crate::types::requests::RegisterUser;

/// Client-side cp methods, grouped the way the vendor documentation groups
/// them.
pub struct CpClient<'a> {
    client: &'a AbcpClient,
}

impl<'a> CpClient<'a> {
    pub(crate) fn new(client: &'a AbcpClient) -> Self {
        Self { client }
    }

    pub fn search(&self) -> Search<'a> {
        Search { client: self.client }
    }

    pub fn basket(&self) -> Basket<'a> {
        Basket { client: self.client }
    }

    pub fn orders(&self) -> Orders<'a> {
        Orders { client: self.client }
    }

    pub fn user(&self) -> User<'a> {
        User { client: self.client }
    }

    pub fn garage(&self) -> Garage<'a> {
        Garage { client: self.client }
    }

    pub fn car_tree(&self) -> CarTree<'a> {
        CarTree { client: self.client }
    }

    pub fn form(&self) -> Form<'a> {
        Form { client: self.client }
    }

    pub fn articles(&self) -> Articles<'a> {
        Articles { client: self.client }
    }
}

/// Part number search.
pub struct Search<'a> {
    client: &'a AbcpClient,
}

impl Search<'_> {
    /// GET search/brands?number=…
    pub async fn brands(
        &self,
        number: &str,
        use_online_stocks: Option<bool>,
        locale: Option<&str>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push("number", number);
        params.push_opt_flag("useOnlineStocks", use_online_stocks);
        params.push_opt("locale", locale);
        self.client.get("search/brands", params).await
    }

    /// GET search/articles?number=…&brand=…
    ///
    /// `profile_id` pretends the search was made by a user with the given
    /// profile; only administrators may use it.
    pub async fn articles(
        &self,
        number: &str,
        brand: &str,
        use_online_stocks: Option<bool>,
        disable_online_filtering: Option<bool>,
        with_out_analogs: Option<bool>,
        profile_id: Option<i64>,
    ) -> Result<Value> {
        if profile_id.is_some() && !self.client.is_admin() {
            return Err(AbcpError::not_enough_rights(
                "only an administrator may set profileId",
            ));
        }
        let mut params = Params::new();
        params.push("number", number);
        params.push("brand", brand);
        params.push_opt_flag("useOnlineStocks", use_online_stocks);
        params.push_opt_flag("disableOnlineFiltering", disable_online_filtering);
        params.push_opt_flag("withOutAnalogs", with_out_analogs);
        params.push_opt("profileId", profile_id);
        self.client.get("search/articles", params).await
    }

    /// POST search/batch
    ///
    /// Each element carries `brand` and `number` keys.
    pub async fn batch(&self, search: &[Value], profile_id: Option<i64>) -> Result<Value> {
        if profile_id.is_some() && !self.client.is_admin() {
            return Err(AbcpError::not_enough_rights(
                "only an administrator may set profileId",
            ));
        }
        let mut params = Params::new();
        params.push_objects("search", search);
        params.push_opt("profileId", profile_id);
        self.client.post_form("search/batch", params).await
    }

    /// GET search/history
    pub async fn history(&self) -> Result<Value> {
        self.client.get("search/history", Params::new()).await
    }

    /// GET search/tips?number=…
    pub async fn tips(&self, number: &str, locale: Option<&str>) -> Result<Value> {
        let mut params = Params::new();
        params.push("number", number);
        params.push_opt("locale", locale);
        self.client.get("search/tips", params).await
    }

    /// GET advices?brand=…&number=…
    pub async fn advices(&self, brand: &str, number: &str, limit: Option<i64>) -> Result<Value> {
        let mut params = Params::new();
        params.push("brand", brand);
        params.push("number", number);
        params.push("limit", limit.unwrap_or(5));
        self.client.get("advices", params).await
    }

    /// POST advices/batch (JSON body)
    pub async fn advices_batch(&self, articles: &[Value], limit: Option<i64>) -> Result<Value> {
        let body = json!({
            "articles": articles,
            "limit": limit.unwrap_or(5),
        });
        self.client.post_json("advices/batch", body).await
    }
}

/// The shopping basket. With multi-basket mode enabled, most methods accept a
/// basket id.
pub struct Basket<'a> {
    client: &'a AbcpClient,
}

impl Basket<'_> {
    /// GET basket/multibasket
    pub async fn get_baskets_list(&self) -> Result<Value> {
        self.client.get("basket/multibasket", Params::new()).await
    }

    /// POST basket/add
    ///
    /// Positions carry `brand`, `number`, `itemKey`, `supplierCode` and
    /// `quantity` keys.
    pub async fn add(&self, positions: &[Value], basket_id: Option<i64>) -> Result<Value> {
        let mut params = Params::new();
        params.push_objects("positions", positions);
        params.push_opt("basketId", basket_id);
        self.client.post_form("basket/add", params).await
    }

    /// POST basket/clear
    pub async fn clear(&self, basket_id: Option<i64>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("basketId", basket_id);
        self.client.post_form("basket/clear", params).await
    }

    /// GET basket/content
    pub async fn content(&self, basket_id: Option<i64>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("basketId", basket_id);
        self.client.get("basket/content", params).await
    }

    /// GET basket/options
    pub async fn options(&self) -> Result<Value> {
        self.client.get("basket/options", Params::new()).await
    }

    /// GET basket/paymentMethods
    pub async fn payment_methods(&self) -> Result<Value> {
        self.client.get("basket/paymentMethods", Params::new()).await
    }

    /// GET basket/shipmentMethods
    pub async fn shipment_methods(&self) -> Result<Value> {
        self.client.get("basket/shipmentMethods", Params::new()).await
    }

    /// GET basket/shipmentOffices
    pub async fn shipment_offices(&self, offices_type: Option<&str>) -> Result<Value> {
        check_one_of("officesType", offices_type, &["order", "registration"])?;
        let mut params = Params::new();
        params.push_opt("officesType", offices_type);
        self.client.get("basket/shipmentOffices", params).await
    }

    /// GET basket/shipmentAddresses
    pub async fn shipment_addresses(&self) -> Result<Value> {
        self.client
            .get("basket/shipmentAddresses", Params::new())
            .await
    }

    /// GET basket/shipmentDates
    pub async fn shipment_dates(
        &self,
        min_deadline_time: Option<DateTimeArg>,
        max_deadline_time: Option<DateTimeArg>,
        shipment_address: Option<i64>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("minDeadlineTime", min_deadline_time.map(|d| d.to_cp()));
        params.push_opt("maxDeadlineTime", max_deadline_time.map(|d| d.to_cp()));
        params.push_opt("shipmentAddress", shipment_address);
        self.client.get("basket/shipmentDates", params).await
    }

    /// POST basket/shipmentAddresses
    pub async fn add_shipment_address(&self, address: &str) -> Result<Value> {
        let mut params = Params::new();
        params.push("address", address);
        self.client
            .post_form("basket/shipmentAddresses", params)
            .await
    }
}

/// Delivery details shared by the two order-creation endpoints.
#[derive(Debug, Clone, Default)]
pub struct OrderDelivery {
    pub payment_method: Option<String>,
    pub shipment_method: Option<String>,
    pub shipment_address: Option<String>,
    pub shipment_office: Option<String>,
    pub shipment_date: Option<DateTimeArg>,
    pub comment: Option<String>,
}

impl OrderDelivery {
    fn fill(&self, params: &mut Params) {
        params.push_opt("paymentMethod", self.payment_method.as_deref());
        params.push_opt("shipmentMethod", self.shipment_method.as_deref());
        params.push_opt("shipmentAddress", self.shipment_address.as_deref());
        params.push_opt("shipmentOffice", self.shipment_office.as_deref());
        params.push_opt("shipmentDate", self.shipment_date.as_ref().map(|d| d.to_cp()));
        params.push_opt("comment", self.comment.as_deref());
    }
}

/// Client order placement and history.
pub struct Orders<'a> {
    client: &'a AbcpClient,
}

impl Orders<'_> {
    /// POST basket/order
    pub async fn order_by_basket(
        &self,
        delivery: &OrderDelivery,
        basket_id: Option<i64>,
        whole_order_only: Option<bool>,
        position_ids: Option<&[i64]>,
        client_order_number: Option<&str>,
    ) -> Result<Value> {
        let mut params = Params::new();
        delivery.fill(&mut params);
        params.push_opt("basketId", basket_id);
        params.push_opt_flag("wholeOrderOnly", whole_order_only);
        params.push_opt_indexed("positionIds", position_ids);
        params.push_opt("clientOrderNumber", client_order_number);
        self.client.post_form("basket/order", params).await
    }

    /// POST orders/instant
    ///
    /// Places an order without touching the basket.
    pub async fn order_instant(
        &self,
        positions: &[Value],
        delivery: &OrderDelivery,
        basket_id: Option<i64>,
        whole_order_only: Option<bool>,
        client_order_number: Option<&str>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_objects("positions", positions);
        delivery.fill(&mut params);
        params.push_opt("basketId", basket_id);
        params.push_opt_flag("wholeOrderOnly", whole_order_only);
        params.push_opt("clientOrderNumber", client_order_number);
        self.client.post_form("orders/instant", params).await
    }

    /// GET orders/list?orders[0]=…
    pub async fn orders_list(&self, orders: &[&str]) -> Result<Value> {
        let mut params = Params::new();
        params.push_indexed("orders", orders);
        self.client.get("orders/list", params).await
    }

    /// GET orders
    ///
    /// `format` only accepts `"p"` (include position details).
    pub async fn get_orders(
        &self,
        format: Option<&str>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Value> {
        check_one_of("format", format, &["p"])?;
        check_limit(limit)?;
        let mut params = Params::new();
        params.push_opt("format", format);
        params.push_opt("skip", skip);
        params.push_opt("limit", limit);
        self.client.get("orders", params).await
    }

    /// POST orders/cancelPosition
    pub async fn cancel_position(&self, position_id: i64) -> Result<Value> {
        let mut params = Params::new();
        params.push("positionId", position_id);
        self.client.post_form("orders/cancelPosition", params).await
    }
}

/// Account registration and maintenance.
pub struct User<'a> {
    client: &'a AbcpClient,
}

impl User<'_> {
    /// POST user/new
    pub async fn register(&self, user: &RegisterUser) -> Result<Value> {
        self.client.post_form("user/new", user.params()?).await
    }

    /// POST user/activation
    pub async fn activate(&self, user_code: i64, activation_code: &str) -> Result<Value> {
        let mut params = Params::new();
        params.push("userCode", user_code);
        params.push("activationCode", activation_code);
        self.client.post_form("user/activation", params).await
    }

    /// GET user/info
    pub async fn user_info(&self) -> Result<Value> {
        self.client.get("user/info", Params::new()).await
    }

    /// POST user/restore
    ///
    /// Two-step password recovery: first call with `email_or_mobile` alone,
    /// then with `password_new` and the SMS `code`.
    pub async fn restore(
        &self,
        email_or_mobile: Option<&str>,
        password_new: Option<&str>,
        code: Option<&str>,
    ) -> Result<Value> {
        match (email_or_mobile, password_new, code) {
            (Some(_), None, None) | (None, Some(_), Some(_)) => {}
            _ => {
                return Err(AbcpError::ParameterRequired(
                    "either emailOrMobile alone, or passwordNew with code".into(),
                ));
            }
        }
        let mut params = Params::new();
        params.push_opt("emailOrMobile", email_or_mobile);
        params.push_opt("passwordNew", password_new);
        params.push_opt("code", code);
        self.client.post_form("user/restore", params).await
    }
}

/// Customer car list. `user_id` is honored only for administrators.
pub struct Garage<'a> {
    client: &'a AbcpClient,
}

impl Garage<'_> {
    fn check_user_id(&self, user_id: Option<i64>) -> Result<()> {
        if user_id.is_some() && !self.client.is_admin() {
            return Err(AbcpError::not_enough_rights(
                "only an administrator may set userId",
            ));
        }
        Ok(())
    }

    /// GET user/garage
    pub async fn get_list(&self, user_id: Option<i64>) -> Result<Value> {
        self.check_user_id(user_id)?;
        let mut params = Params::new();
        params.push_opt("userId", user_id);
        self.client.get("user/garage", params).await
    }

    /// GET user/garage/car
    pub async fn get_car(&self, car_id: i64, user_id: Option<i64>) -> Result<Value> {
        self.check_user_id(user_id)?;
        let mut params = Params::new();
        params.push("carId", car_id);
        params.push_opt("userId", user_id);
        self.client.get("user/garage/car", params).await
    }

    /// POST user/garage/add
    #[allow(clippy::too_many_arguments)]
    pub async fn add(
        &self,
        name: &str,
        comment: Option<&str>,
        year: Option<i32>,
        vin: Option<&str>,
        frame: Option<&str>,
        mileage: Option<i64>,
        manufacturer_id: Option<i64>,
        model_id: Option<i64>,
        modification_id: Option<i64>,
        vehicle_reg_plate: Option<&str>,
        user_id: Option<i64>,
    ) -> Result<Value> {
        self.check_user_id(user_id)?;
        let mut params = Params::new();
        params.push("name", name);
        params.push_opt("comment", comment);
        params.push_opt("year", year);
        params.push_opt("vin", vin);
        params.push_opt("frame", frame);
        params.push_opt("mileage", mileage);
        params.push_opt("manufacturerId", manufacturer_id);
        params.push_opt("modelId", model_id);
        params.push_opt("modificationId", modification_id);
        params.push_opt("vehicleRegPlate", vehicle_reg_plate);
        params.push_opt("userId", user_id);
        self.client.post_form("user/garage/add", params).await
    }

    /// POST user/garage/update
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        car_id: i64,
        name: Option<&str>,
        comment: Option<&str>,
        year: Option<i32>,
        vin: Option<&str>,
        frame: Option<&str>,
        mileage: Option<i64>,
        manufacturer_id: Option<i64>,
        model_id: Option<i64>,
        modification_id: Option<i64>,
        vehicle_reg_plate: Option<&str>,
        user_id: Option<i64>,
    ) -> Result<Value> {
        self.check_user_id(user_id)?;
        let mut params = Params::new();
        params.push("carId", car_id);
        params.push_opt("name", name);
        params.push_opt("comment", comment);
        params.push_opt("year", year);
        params.push_opt("vin", vin);
        params.push_opt("frame", frame);
        params.push_opt("mileage", mileage);
        params.push_opt("manufacturerId", manufacturer_id);
        params.push_opt("modelId", model_id);
        params.push_opt("modificationId", modification_id);
        params.push_opt("vehicleRegPlate", vehicle_reg_plate);
        params.push_opt("userId", user_id);
        self.client.post_form("user/garage/update", params).await
    }

    /// POST user/garage/delete
    pub async fn delete(&self, car_id: i64, user_id: Option<i64>) -> Result<Value> {
        self.check_user_id(user_id)?;
        let mut params = Params::new();
        params.push("carId", car_id);
        params.push_opt("userId", user_id);
        self.client.post_form("user/garage/delete", params).await
    }
}

/// Vehicle catalog tree.
pub struct CarTree<'a> {
    client: &'a AbcpClient,
}

impl CarTree<'_> {
    /// GET cartree/years
    pub async fn years(&self, manufacturer_id: Option<i64>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("manufacturerId", manufacturer_id);
        self.client.get("cartree/years", params).await
    }

    /// GET cartree/manufacturers
    pub async fn manufacturers(&self, year: Option<i32>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("year", year);
        self.client.get("cartree/manufacturers", params).await
    }

    /// GET cartree/models
    pub async fn models(&self, manufacturer_id: Option<i64>, year: Option<i32>) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("manufacturerId", manufacturer_id);
        params.push_opt("year", year);
        self.client.get("cartree/models", params).await
    }

    /// GET cartree/modifications
    pub async fn modifications(
        &self,
        manufacturer_id: Option<i64>,
        model_id: Option<i64>,
        year: Option<i32>,
    ) -> Result<Value> {
        let mut params = Params::new();
        params.push_opt("manufacturerId", manufacturer_id);
        params.push_opt("modelId", model_id);
        params.push_opt("year", year);
        self.client.get("cartree/modifications", params).await
    }
}

/// Registration form descriptions.
pub struct Form<'a> {
    client: &'a AbcpClient,
}

impl Form<'_> {
    /// GET form/fields?name=…
    pub async fn fields(&self, name: &str, locale: Option<&str>) -> Result<Value> {
        check_one_of(
            "name",
            Some(name),
            &["registration_wholesale", "registration_retail"],
        )?;
        let mut params = Params::new();
        params.push("name", name);
        params.push_opt("locale", locale);
        self.client.get("form/fields", params).await
    }
}

/// Article reference data. `info` is administrator-only.
pub struct Articles<'a> {
    client: &'a AbcpClient,
}

impl Articles<'_> {
    /// GET articles/brands
    pub async fn brands(&self) -> Result<Value> {
        self.client.get("articles/brands", Params::new()).await
    }

    /// GET articles/info?brand=…&number=…
    ///
    /// `format` is a set of single-character flags from `bnpchmti`; `source`
    /// selects catalogs.
    pub async fn info(
        &self,
        brand: &str,
        number: &str,
        format: &str,
        source: &[&str],
        cross_image: Option<bool>,
        with_original: Option<bool>,
        locale: Option<&str>,
    ) -> Result<Value> {
        if !self.client.is_admin() {
            return Err(AbcpError::not_enough_rights(
                "articles/info is available to administrators only",
            ));
        }
        check_flags("format", Some(format), "bnpchmti")?;
        for s in source {
            check_one_of("source", Some(s), &["standard", "common", "common_cat"])?;
        }
        let mut params = Params::new();
        params.push("brand", brand);
        params.push("number", number);
        params.push("format", format);
        params.push_indexed("source", source);
        params.push_opt_flag("crossImage", cross_image);
        params.push_opt_bool_str("withOriginal", with_original);
        params.push_opt("locale", locale);
        self.client.get("articles/info", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::client::ClientConfig;
    use url::Url;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MD5: &str = "0123456789abcdef0123456789abcdef";

    fn json_ok(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body, "application/json")
    }

    async fn client_creds(server: &MockServer) -> AbcpClient {
        AbcpClient::with_config_and_base_url(
            "id200.public.api.abcp.ru",
            "10024",
            MD5,
            ClientConfig::default(),
            Url::parse(&server.uri()).and_then(|u| u.join("/")).unwrap(),
        )
        .unwrap()
    }

    async fn admin_creds(server: &MockServer) -> AbcpClient {
        AbcpClient::with_config_and_base_url(
            "id200",
            "api@id200",
            MD5,
            ClientConfig::default(),
            Url::parse(&server.uri()).and_then(|u| u.join("/")).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_brands_path_and_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/brands"))
            .and(query_param("number", "01089"))
            .and(query_param("useOnlineStocks", "1"))
            .respond_with(json_ok("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_creds(&server).await;
        client
            .cp()
            .client()
            .search()
            .brands("01089", Some(true), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_search_articles_profile_id_requires_admin() {
        let server = MockServer::start().await;
        let client = client_creds(&server).await;
        let err = client
            .cp()
            .client()
            .search()
            .articles("01089", "Febi", None, None, None, Some(123))
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::NotEnoughRights { .. }));
    }

    #[tokio::test]
    async fn test_search_batch_is_post_with_bracketed_positions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search/batch"))
            .and(body_string_contains("search%5B0%5D%5Bbrand%5D=Febi"))
            .and(body_string_contains("userlogin=10024"))
            .respond_with(json_ok("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_creds(&server).await;
        client
            .cp()
            .client()
            .search()
            .batch(&[json!({"brand": "Febi", "number": "01089"})], None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_basket_add_posts_positions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/basket/add"))
            .and(body_string_contains("positions%5B0%5D%5Bnumber%5D=01089"))
            .respond_with(json_ok(r#"{"status":1}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_creds(&server).await;
        client
            .cp()
            .client()
            .basket()
            .add(
                &[json!({"brand": "Febi", "number": "01089", "quantity": 1})],
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_basket_shipment_offices_validation() {
        let server = MockServer::start().await;
        let client = client_creds(&server).await;
        let err = client
            .cp()
            .client()
            .basket()
            .shipment_offices(Some("bogus"))
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::WrongParameter { name: "officesType", .. }));
    }

    #[tokio::test]
    async fn test_get_orders_rejects_unknown_format() {
        let server = MockServer::start().await;
        let client = client_creds(&server).await;
        let err = client
            .cp()
            .client()
            .orders()
            .get_orders(Some("x"), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::WrongParameter { name: "format", .. }));
    }

    #[tokio::test]
    async fn test_user_restore_stage_validation() {
        let server = MockServer::start().await;
        let client = client_creds(&server).await;
        // Mixing the two recovery stages is rejected before any request.
        let err = client
            .cp()
            .client()
            .user()
            .restore(Some("user@example.com"), Some("newpass"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::ParameterRequired(_)));
    }

    #[tokio::test]
    async fn test_garage_user_id_requires_admin() {
        let server = MockServer::start().await;
        let client = client_creds(&server).await;
        let err = client
            .cp()
            .client()
            .garage()
            .get_list(Some(42))
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::NotEnoughRights { .. }));
    }

    #[tokio::test]
    async fn test_articles_info_admin_only_and_flags() {
        let server = MockServer::start().await;
        let client = client_creds(&server).await;
        let err = client
            .cp()
            .client()
            .articles()
            .info("Febi", "01089", "bn", &["standard"], None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::NotEnoughRights { .. }));

        let admin = admin_creds(&server).await;
        let err = admin
            .cp()
            .client()
            .articles()
            .info("Febi", "01089", "zz", &["standard"], None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AbcpError::WrongParameter { name: "format", .. }));
    }
}
