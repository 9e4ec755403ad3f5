/*
[INPUT]:  Typed request descriptions for wide endpoints
[OUTPUT]: Wire parameters via each struct's params()
[POS]:    Request types - filters and payload builders too wide for plain arguments
[UPDATE]: When an endpoint gains new filter fields
*/

use rust_decimal::Decimal;
use serde_json::Value;

use crate::http::dates::{DateArg, DateTimeArg};
use crate::http::error::{AbcpError, Result};
use crate::http::params::{
    Params, check_digits, check_fields, check_flags, check_limit, check_one_of, check_range,
};

/// New client account for `POST user/new`.
#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub market_type: i32,
    pub name: String,
    pub second_name: String,
    pub surname: String,
    pub password: String,
    pub mobile: String,
    pub office: String,
    pub email: String,
    pub icq: Option<String>,
    pub skype: Option<String>,
    pub region_id: Option<i64>,
    pub business: Option<i32>,
    pub organization_name: Option<String>,
    pub organization_form: Option<String>,
    pub organization_official_name: Option<String>,
    pub inn: Option<String>,
    pub kpp: Option<String>,
    pub ogrn: Option<String>,
    pub organization_official_address: Option<String>,
    pub bank_name: Option<String>,
    pub bik: Option<String>,
    pub correspondent_account: Option<String>,
    pub organization_account: Option<String>,
    pub delivery_address: Option<String>,
    pub comment: Option<String>,
    pub send_registration_email: Option<bool>,
    pub member_of_club: Option<String>,
    pub birth_date: Option<DateArg>,
    pub filial_id: Option<i64>,
    pub profile_id: Option<i64>,
}

impl RegisterUser {
    pub fn new(
        market_type: i32,
        name: impl Into<String>,
        second_name: impl Into<String>,
        surname: impl Into<String>,
        password: impl Into<String>,
        mobile: impl Into<String>,
        office: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            market_type,
            name: name.into(),
            second_name: second_name.into(),
            surname: surname.into(),
            password: password.into(),
            mobile: mobile.into(),
            office: office.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub(crate) fn params(&self) -> Result<Params> {
        check_digits("mobile", Some(&self.mobile))?;
        let mut p = Params::new();
        p.push("marketType", self.market_type);
        p.push("name", &self.name);
        p.push("secondName", &self.second_name);
        p.push("surname", &self.surname);
        p.push("password", &self.password);
        p.push("mobile", &self.mobile);
        p.push("office", &self.office);
        p.push("email", &self.email);
        p.push_opt("icq", self.icq.as_deref());
        p.push_opt("skype", self.skype.as_deref());
        p.push_opt("regionId", self.region_id);
        p.push_opt("business", self.business);
        p.push_opt("organizationName", self.organization_name.as_deref());
        p.push_opt("organizationForm", self.organization_form.as_deref());
        p.push_opt(
            "organizationOfficialName",
            self.organization_official_name.as_deref(),
        );
        p.push_opt("inn", self.inn.as_deref());
        p.push_opt("kpp", self.kpp.as_deref());
        p.push_opt("ogrn", self.ogrn.as_deref());
        p.push_opt(
            "organizationOfficialAddress",
            self.organization_official_address.as_deref(),
        );
        p.push_opt("bankName", self.bank_name.as_deref());
        p.push_opt("bik", self.bik.as_deref());
        p.push_opt("correspondentAccount", self.correspondent_account.as_deref());
        p.push_opt("organizationAccount", self.organization_account.as_deref());
        p.push_opt("deliveryAddress", self.delivery_address.as_deref());
        p.push_opt("comment", self.comment.as_deref());
        p.push_opt_flag("sendRegistrationEmail", self.send_registration_email);
        p.push_opt("memberOfClub", self.member_of_club.as_deref());
        p.push_opt("birthDate", self.birth_date.as_ref().map(|d| d.to_wire()));
        p.push_opt("filialId", self.filial_id);
        p.push_opt("profileId", self.profile_id);
        Ok(p)
    }
}

/// Filter for `GET cp/orders`.
#[derive(Debug, Clone, Default)]
pub struct OrdersListFilter {
    pub date_created_start: Option<DateTimeArg>,
    pub date_created_end: Option<DateTimeArg>,
    pub date_updated_start: Option<DateTimeArg>,
    pub date_updated_end: Option<DateTimeArg>,
    pub numbers: Option<Vec<String>>,
    pub internal_numbers: Option<Vec<String>>,
    pub status_code: Option<Vec<i64>>,
    pub office_id: Option<i64>,
    pub distributor_order_id: Option<i64>,
    pub is_canceled: Option<bool>,
    pub distributor_id: Option<Vec<i64>>,
    pub user_id: Option<i64>,
    pub with_deleted: Option<bool>,
    pub format: Option<String>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    pub desc: Option<bool>,
}

impl OrdersListFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_one_of(
            "format",
            self.format.as_deref(),
            &["additional", "short", "count", "status_only", "p"],
        )?;
        check_limit(self.limit)?;
        let mut p = Params::new();
        p.push_opt(
            "dateCreatedStart",
            self.date_created_start.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "dateCreatedEnd",
            self.date_created_end.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "dateUpdatedStart",
            self.date_updated_start.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "dateUpdatedEnd",
            self.date_updated_end.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt_indexed("numbers", self.numbers.as_deref());
        p.push_opt_indexed("internalNumbers", self.internal_numbers.as_deref());
        p.push_opt_indexed("statusCode", self.status_code.as_deref());
        p.push_opt("officeId", self.office_id);
        p.push_opt("distributorOrderId", self.distributor_order_id);
        p.push_opt_flag("isCanceled", self.is_canceled);
        p.push_opt_indexed("distributorId", self.distributor_id.as_deref());
        p.push_opt("userId", self.user_id);
        p.push_opt_flag("withDeleted", self.with_deleted);
        p.push_opt("format", self.format.as_deref());
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        p.push_opt_bool_str("desc", self.desc);
        Ok(p)
    }
}

/// Order payload for `POST cp/order`. Creates a new order or, when `number`
/// or `internal_number` refers to an existing one, edits it.
#[derive(Debug, Clone, Default)]
pub struct SaveOrder {
    pub number: Option<String>,
    pub internal_number: Option<String>,
    pub user_id: Option<i64>,
    pub date: Option<DateTimeArg>,
    pub comment: Option<String>,
    /// Positions in wire form, keys as the vendor documents them
    pub positions: Option<Vec<Value>>,
    pub delivery_type_id: Option<i64>,
    pub delivery_office_id: Option<i64>,
    pub basket_id: Option<i64>,
    pub guest_order_name: Option<String>,
    pub guest_order_mobile: Option<String>,
    pub guest_order_email: Option<String>,
    pub shipment_date: Option<DateTimeArg>,
    pub delivery_cost: Option<Decimal>,
    pub delivery_address_id: Option<i64>,
    pub delivery_address: Option<String>,
    pub manager_id: Option<i64>,
    pub client_order_number: Option<String>,
    /// Adds a note to the order; mutually exclusive with `del_note`
    pub note: Option<String>,
    /// Removes the note with this id
    pub del_note: Option<i64>,
}

impl SaveOrder {
    pub(crate) fn params(&self) -> Result<Params> {
        if self.number.is_none() && self.internal_number.is_none() {
            return Err(AbcpError::ParameterRequired(
                "number or internalNumber".into(),
            ));
        }
        if self.delivery_address_id == Some(-1) && self.delivery_address.is_none() {
            return Err(AbcpError::ParameterRequired(
                "deliveryAddress when deliveryAddressId is -1".into(),
            ));
        }
        if self.delivery_cost.is_some() && self.delivery_address_id.is_none() {
            return Err(AbcpError::ParameterRequired(
                "deliveryAddressId when deliveryCost is set".into(),
            ));
        }
        if self.delivery_address_id.is_some() && self.delivery_type_id.is_none() {
            return Err(AbcpError::ParameterRequired(
                "deliveryTypeId when deliveryAddressId is set".into(),
            ));
        }
        if self.note.is_some() && self.del_note.is_some() {
            return Err(AbcpError::wrong_parameter(
                "note",
                "a note can be either added or deleted, not both",
            ));
        }
        let mut p = Params::new();
        p.push_opt("order[number]", self.number.as_deref());
        p.push_opt("order[internalNumber]", self.internal_number.as_deref());
        p.push_opt("order[userId]", self.user_id);
        p.push_opt("order[date]", self.date.as_ref().map(|d| d.to_cp()));
        p.push_opt("order[comment]", self.comment.as_deref());
        p.push_opt("order[deliveryTypeId]", self.delivery_type_id);
        p.push_opt("order[deliveryOfficeId]", self.delivery_office_id);
        p.push_opt("order[basketId]", self.basket_id);
        p.push_opt("order[guestOrderName]", self.guest_order_name.as_deref());
        p.push_opt("order[guestOrderMobile]", self.guest_order_mobile.as_deref());
        p.push_opt("order[guestOrderEmail]", self.guest_order_email.as_deref());
        p.push_opt(
            "order[shipmentDate]",
            self.shipment_date.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt("order[deliveryCost]", self.delivery_cost);
        p.push_opt("order[deliveryAddressId]", self.delivery_address_id);
        p.push_opt("order[deliveryAddress]", self.delivery_address.as_deref());
        p.push_opt("order[managerId]", self.manager_id);
        p.push_opt_objects("order[positions]", self.positions.as_deref());
        if let Some(note) = &self.note {
            p.push("order[notes][0][value]", note);
        }
        if let Some(id) = self.del_note {
            p.push("order[notes][0][value]", "");
            p.push("order[notes][0][id]", id);
        }
        p.push_opt("clientOrderNumber", self.client_order_number.as_deref());
        Ok(p)
    }
}

/// Filter for `GET cp/users`.
#[derive(Debug, Clone, Default)]
pub struct UsersListFilter {
    pub date_registred_start: Option<DateTimeArg>,
    pub date_registred_end: Option<DateTimeArg>,
    pub date_updated_start: Option<DateTimeArg>,
    pub date_updated_end: Option<DateTimeArg>,
    pub state: Option<i32>,
    pub customer_status: Option<i64>,
    pub customers_ids: Option<Vec<i64>>,
    pub market_type: Option<i32>,
    pub phone: Option<String>,
    pub enable_sms: Option<bool>,
    pub email: Option<String>,
    pub safe_mode: Option<i32>,
    pub format: Option<String>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    pub desc: Option<bool>,
}

impl UsersListFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_one_of("format", self.format.as_deref(), &["p"])?;
        check_limit(self.limit)?;
        let mut p = Params::new();
        p.push_opt(
            "dateRegistredStart",
            self.date_registred_start.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "dateRegistredEnd",
            self.date_registred_end.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "dateUpdatedStart",
            self.date_updated_start.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "dateUpdatedEnd",
            self.date_updated_end.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt("state", self.state);
        p.push_opt("customerStatus", self.customer_status);
        p.push_opt_indexed("customersIds", self.customers_ids.as_deref());
        p.push_opt("marketType", self.market_type);
        p.push_opt("phone", self.phone.as_deref());
        p.push_opt_bool_str("enableSms", self.enable_sms);
        p.push_opt("email", self.email.as_deref());
        p.push_opt("safeMode", self.safe_mode);
        p.push_opt("format", self.format.as_deref());
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        p.push_opt_bool_str("desc", self.desc);
        Ok(p)
    }
}

/// New customer for `POST cp/user/new`, the administrative registration.
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub market_type: i32,
    pub name: String,
    pub password: String,
    pub mobile: String,
    pub filial_id: Option<i64>,
    pub second_name: Option<String>,
    pub surname: Option<String>,
    pub birth_date: Option<DateArg>,
    pub member_of_club: Option<String>,
    pub office: Option<String>,
    pub email: Option<String>,
    pub icq: Option<String>,
    pub skype: Option<String>,
    pub region_id: Option<String>,
    pub city: Option<String>,
    pub organization_name: Option<String>,
    pub business: Option<i32>,
    pub organization_form: Option<String>,
    pub organization_official_name: Option<String>,
    pub inn: Option<String>,
    pub kpp: Option<String>,
    pub ogrn: Option<String>,
    pub organization_official_address: Option<String>,
    pub bank_name: Option<String>,
    pub bik: Option<String>,
    pub correspondent_account: Option<String>,
    pub organization_account: Option<String>,
    pub delivery_address: Option<String>,
    pub comment: Option<String>,
    pub profile_id: Option<i64>,
    pub pickup_state: Option<bool>,
}

impl CreateUser {
    pub fn new(
        market_type: i32,
        name: impl Into<String>,
        password: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            market_type,
            name: name.into(),
            password: password.into(),
            mobile: mobile.into(),
            ..Default::default()
        }
    }

    pub(crate) fn params(&self) -> Result<Params> {
        check_digits("mobile", Some(&self.mobile))?;
        let mut p = Params::new();
        p.push("marketType", self.market_type);
        p.push("name", &self.name);
        p.push("password", &self.password);
        p.push("mobile", &self.mobile);
        p.push_opt("filialId", self.filial_id);
        p.push_opt("secondName", self.second_name.as_deref());
        p.push_opt("surname", self.surname.as_deref());
        p.push_opt("birthDate", self.birth_date.as_ref().map(|d| d.to_wire()));
        p.push_opt("memberOfClub", self.member_of_club.as_deref());
        p.push_opt("office", self.office.as_deref());
        p.push_opt("email", self.email.as_deref());
        p.push_opt("icq", self.icq.as_deref());
        p.push_opt("skype", self.skype.as_deref());
        p.push_opt("regionId", self.region_id.as_deref());
        p.push_opt("city", self.city.as_deref());
        p.push_opt("organizationName", self.organization_name.as_deref());
        p.push_opt("business", self.business);
        p.push_opt("organizationForm", self.organization_form.as_deref());
        p.push_opt(
            "organizationOfficialName",
            self.organization_official_name.as_deref(),
        );
        p.push_opt("inn", self.inn.as_deref());
        p.push_opt("kpp", self.kpp.as_deref());
        p.push_opt("ogrn", self.ogrn.as_deref());
        p.push_opt(
            "organizationOfficialAddress",
            self.organization_official_address.as_deref(),
        );
        p.push_opt("bankName", self.bank_name.as_deref());
        p.push_opt("bik", self.bik.as_deref());
        p.push_opt("correspondentAccount", self.correspondent_account.as_deref());
        p.push_opt("organizationAccount", self.organization_account.as_deref());
        p.push_opt("deliveryAddress", self.delivery_address.as_deref());
        p.push_opt("comment", self.comment.as_deref());
        p.push_opt("profileId", self.profile_id);
        p.push_opt_flag("pickupState", self.pickup_state);
        Ok(p)
    }
}

/// Changes to an existing customer for `POST cp/user`.
#[derive(Debug, Clone, Default)]
pub struct EditUser {
    pub user_id: i64,
    pub business: Option<i32>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub second_name: Option<String>,
    pub surname: Option<String>,
    pub password: Option<String>,
    pub birth_date: Option<DateArg>,
    pub city: Option<String>,
    pub mobile: Option<String>,
    pub icq: Option<String>,
    pub skype: Option<String>,
    pub enable_sms: Option<bool>,
    pub enable_whatsapp: Option<bool>,
    pub state: Option<i32>,
    pub profile_id: Option<i64>,
    pub organization_name: Option<String>,
    pub organization_form: Option<String>,
    pub organization_official_name: Option<String>,
    pub inn: Option<String>,
    pub kpp: Option<String>,
    pub ogrn: Option<String>,
    pub bank_name: Option<String>,
    pub bik: Option<String>,
    pub correspondent_account: Option<String>,
    pub organization_account: Option<String>,
    pub delivery_address: Option<Vec<Value>>,
    pub baskets: Option<Vec<Value>>,
    pub baskets_delivery_address: Option<Vec<Value>>,
    pub comment: Option<String>,
    pub manager_comment: Option<String>,
    pub manager_id: Option<i64>,
    pub user_code: Option<String>,
    pub client_service_employee_id: Option<i64>,
    pub client_service_employee2_id: Option<i64>,
    pub client_service_employee3_id: Option<i64>,
    pub client_service_employee4_id: Option<i64>,
    pub office: Option<Vec<Value>>,
    pub info: Option<String>,
    pub safe_mode: Option<i32>,
    pub pickup_state: Option<bool>,
}

impl EditUser {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub(crate) fn params(&self) -> Params {
        let mut p = Params::new();
        p.push("userId", self.user_id);
        p.push_opt("business", self.business);
        p.push_opt("email", self.email.as_deref());
        p.push_opt("name", self.name.as_deref());
        p.push_opt("secondName", self.second_name.as_deref());
        p.push_opt("surname", self.surname.as_deref());
        p.push_opt("password", self.password.as_deref());
        p.push_opt("birthDate", self.birth_date.as_ref().map(|d| d.to_wire()));
        p.push_opt("city", self.city.as_deref());
        p.push_opt("mobile", self.mobile.as_deref());
        p.push_opt("icq", self.icq.as_deref());
        p.push_opt("skype", self.skype.as_deref());
        p.push_opt_bool_str("enableSms", self.enable_sms);
        p.push_opt_bool_str("enableWhatsapp", self.enable_whatsapp);
        p.push_opt("state", self.state);
        p.push_opt("profileId", self.profile_id);
        p.push_opt("organizationName", self.organization_name.as_deref());
        p.push_opt("organizationForm", self.organization_form.as_deref());
        p.push_opt(
            "organizationOfficialName",
            self.organization_official_name.as_deref(),
        );
        p.push_opt("inn", self.inn.as_deref());
        p.push_opt("kpp", self.kpp.as_deref());
        p.push_opt("ogrn", self.ogrn.as_deref());
        p.push_opt("bankName", self.bank_name.as_deref());
        p.push_opt("bik", self.bik.as_deref());
        p.push_opt("correspondentAccount", self.correspondent_account.as_deref());
        p.push_opt("organizationAccount", self.organization_account.as_deref());
        p.push_opt_objects("deliveryAddress", self.delivery_address.as_deref());
        p.push_opt_objects("baskets", self.baskets.as_deref());
        p.push_opt_objects(
            "basketsDeliveryAddress",
            self.baskets_delivery_address.as_deref(),
        );
        p.push_opt("comment", self.comment.as_deref());
        p.push_opt("managerComment", self.manager_comment.as_deref());
        p.push_opt("managerId", self.manager_id);
        p.push_opt("userCode", self.user_code.as_deref());
        p.push_opt("clientServiceEmployeeId", self.client_service_employee_id);
        p.push_opt("clientServiceEmployee2Id", self.client_service_employee2_id);
        p.push_opt("clientServiceEmployee3Id", self.client_service_employee3_id);
        p.push_opt("clientServiceEmployee4Id", self.client_service_employee4_id);
        p.push_opt_objects("office", self.office.as_deref());
        p.push_opt("info", self.info.as_deref());
        p.push_opt("safeMode", self.safe_mode);
        p.push_opt_flag("pickupState", self.pickup_state);
        p
    }
}

/// Filter for `GET komtet/getChecks`, the fiscal receipt log.
#[derive(Debug, Clone, Default)]
pub struct ReceiptsFilter {
    pub shop_id: Option<i64>,
    pub queue_id: Option<i64>,
    pub date_created_start: Option<DateTimeArg>,
    pub date_created_end: Option<DateTimeArg>,
    pub calculation_method: Option<i32>,
    pub print_paper_check: Option<i32>,
    pub vat: Option<i32>,
    pub calculation_subject: Option<i32>,
    pub payment_type: Option<i32>,
    pub r#type: Option<i32>,
    pub tax_system: Option<i32>,
    pub intent: Option<i32>,
    pub fiscalization: Option<i32>,
    pub employee_id: Option<i64>,
    pub client_id: Option<i64>,
    pub start: Option<i64>,
    pub rows_on_page: Option<i64>,
}

impl ReceiptsFilter {
    pub(crate) fn params(&self) -> Params {
        let mut p = Params::new();
        p.push_opt("shopId", self.shop_id);
        p.push_opt("queueId", self.queue_id);
        p.push_opt(
            "dateCreatedStart",
            self.date_created_start.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "dateCreatedEnd",
            self.date_created_end.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt("calculationMethod", self.calculation_method);
        p.push_opt("printPaperCheck", self.print_paper_check);
        p.push_opt("vat", self.vat);
        p.push_opt("calculationSubject", self.calculation_subject);
        p.push_opt("paymentType", self.payment_type);
        p.push_opt("type", self.r#type);
        p.push_opt("taxSystem", self.tax_system);
        p.push_opt("intent", self.intent);
        p.push_opt("fiscalization", self.fiscalization);
        p.push_opt("employeeId", self.employee_id);
        p.push_opt("clientId", self.client_id);
        p.push_opt("start", self.start);
        p.push_opt("rowsOnPage", self.rows_on_page);
        p
    }
}

/// Changes to a distributor route for `POST cp/route`.
#[derive(Debug, Clone, Default)]
pub struct RouteUpdate {
    pub route_id: i64,
    pub deadline: Option<i64>,
    pub deadline_replace: Option<String>,
    pub is_deadline_replace_franch_enabled: Option<bool>,
    pub deadline_max: Option<i64>,
    pub normal_time_start: Option<String>,
    pub normal_time_end: Option<String>,
    pub normal_days_of_week: Option<Vec<i32>>,
    pub abnormal_deadline: Option<i64>,
    pub abnormal_deadline_max: Option<i64>,
    pub p1: Option<i64>,
    pub p2: Option<i64>,
    pub price_per_kg: Option<Decimal>,
    pub price_up_added: Option<Decimal>,
    pub c1: Option<i64>,
    pub price_up_min: Option<Decimal>,
    pub price_up_max: Option<Decimal>,
    pub primary_price_up_to_contractor: Option<Decimal>,
    pub delivery_probability: Option<i32>,
    pub description: Option<String>,
    pub enable_color: Option<bool>,
    pub color: Option<String>,
    pub is_abnormal_color_enabled: Option<bool>,
    pub abnormal_color: Option<String>,
    pub no_return: Option<bool>,
    pub supplier_code_enabled_list: Option<Vec<String>>,
    pub supplier_code_disabled_list: Option<Vec<String>>,
    pub normal_time_display_only: Option<i32>,
    pub disable_order_abnormal_time: Option<i32>,
    pub not_use_online_supplier_deadline: Option<i32>,
}

impl RouteUpdate {
    pub fn new(route_id: i64) -> Self {
        Self {
            route_id,
            ..Default::default()
        }
    }

    pub(crate) fn params(&self) -> Params {
        let mut p = Params::new();
        p.push("routeId", self.route_id);
        p.push_opt("deadline", self.deadline);
        p.push_opt("deadlineReplace", self.deadline_replace.as_deref());
        p.push_opt_bool_str(
            "isDeadlineReplaceFranchEnabled",
            self.is_deadline_replace_franch_enabled,
        );
        p.push_opt("deadlineMax", self.deadline_max);
        p.push_opt("normalTimeStart", self.normal_time_start.as_deref());
        p.push_opt("normalTimeEnd", self.normal_time_end.as_deref());
        p.push_opt_indexed("normalDaysOfWeek", self.normal_days_of_week.as_deref());
        p.push_opt("abnormalDeadline", self.abnormal_deadline);
        p.push_opt("abnormalDeadlineMax", self.abnormal_deadline_max);
        p.push_opt("p1", self.p1);
        p.push_opt("p2", self.p2);
        p.push_opt("pricePerKg", self.price_per_kg);
        p.push_opt("priceUpAdded", self.price_up_added);
        p.push_opt("c1", self.c1);
        p.push_opt("priceUpMin", self.price_up_min);
        p.push_opt("priceUpMax", self.price_up_max);
        p.push_opt(
            "primaryPriceUpToContractor",
            self.primary_price_up_to_contractor,
        );
        p.push_opt("deliveryProbability", self.delivery_probability);
        p.push_opt("description", self.description.as_deref());
        p.push_opt_flag("enableColor", self.enable_color);
        p.push_opt("color", self.color.as_deref());
        p.push_opt_flag("isAbnormalColorEnabled", self.is_abnormal_color_enabled);
        p.push_opt("abnormalColor", self.abnormal_color.as_deref());
        p.push_opt_flag("noReturn", self.no_return);
        p.push_opt_indexed(
            "supplierCodeEnabledList",
            self.supplier_code_enabled_list.as_deref(),
        );
        p.push_opt_indexed(
            "supplierCodeDisabledList",
            self.supplier_code_disabled_list.as_deref(),
        );
        p.push_opt("normalTimeDisplayOnly", self.normal_time_display_only);
        p.push_opt("disableOrderAbnormalTime", self.disable_order_abnormal_time);
        p.push_opt(
            "notUseOnlineSupplierDeadline",
            self.not_use_online_supplier_deadline,
        );
        p
    }
}

/// Filter for `GET ts/goodReceipts` / `GET cp/ts/goodReceipts/get`.
#[derive(Debug, Clone, Default)]
pub struct GoodReceiptsFilter {
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    /// Output flags drawn from `d`, `e`, `s`
    pub output: Option<String>,
    pub auto: Option<String>,
    pub creator_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub agreement_id: Option<i64>,
    pub statuses: Option<Vec<i64>>,
    pub number: Option<String>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub sup_number: Option<String>,
}

impl GoodReceiptsFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_limit(self.limit)?;
        check_flags("output", self.output.as_deref(), "des")?;
        let mut p = Params::new();
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        p.push_opt("output", self.output.as_deref());
        p.push_opt("auto", self.auto.as_deref());
        p.push_opt("creatorId", self.creator_id);
        p.push_opt("workerId", self.worker_id);
        p.push_opt("agreementId", self.agreement_id);
        p.push_opt_csv("statuses", self.statuses.as_deref());
        p.push_opt("number", self.number.as_deref());
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt("supNumber", self.sup_number.as_deref());
        Ok(p)
    }
}

/// Filter for order picking lists, used by both namespaces of
/// `ts/orderPickings/get`.
#[derive(Debug, Clone, Default)]
pub struct OrderPickingsFilter {
    pub id: Option<i64>,
    pub client_id: Option<i64>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    /// Output flags drawn from `d`, `e`, `s`
    pub output: Option<String>,
    pub auto: Option<String>,
    pub creator_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub agreement_id: Option<i64>,
    pub statuses: Option<Vec<i64>>,
    pub number: Option<String>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub co_old_pos_ids: Option<Vec<i64>>,
}

impl OrderPickingsFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_limit(self.limit)?;
        check_flags("output", self.output.as_deref(), "des")?;
        if let Some(statuses) = &self.statuses {
            for s in statuses {
                check_range("status", Some(*s), 1..=3)?;
            }
        }
        let mut p = Params::new();
        p.push_opt("id", self.id);
        p.push_opt("clientId", self.client_id);
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        p.push_opt("output", self.output.as_deref());
        p.push_opt("auto", self.auto.as_deref());
        p.push_opt("creatorId", self.creator_id);
        p.push_opt("workerId", self.worker_id);
        p.push_opt("agreementId", self.agreement_id);
        p.push_opt_csv("statuses", self.statuses.as_deref());
        p.push_opt("number", self.number.as_deref());
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt_csv("coOldPosIds", self.co_old_pos_ids.as_deref());
        Ok(p)
    }
}

/// Filter for customer complaint lists (`customerComplaints/get`).
#[derive(Debug, Clone, Default)]
pub struct CustomerComplaintsFilter {
    pub id: Option<i64>,
    pub client_id: Option<i64>,
    pub creator_id: Option<i64>,
    pub expert_id: Option<i64>,
    pub auto: Option<String>,
    pub number: Option<String>,
    pub order_picking_id: Option<i64>,
    pub position_statuses: Option<Vec<i64>>,
    /// 1 return, 2 exchange, 3 warranty
    pub position_type: Option<i64>,
    pub position_auto: Option<String>,
    pub tag_ids: Option<Vec<i64>>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub output: Option<String>,
    pub fields: Option<Vec<String>>,
}

impl CustomerComplaintsFilter {
    pub(crate) fn params(&self, allowed_fields: &[&str]) -> Result<Params> {
        check_limit(self.limit)?;
        check_range("positionType", self.position_type, 1..=3)?;
        let fields = self
            .fields
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect::<Vec<_>>());
        let fields =
            check_fields(fields.as_deref(), allowed_fields)?;
        let mut p = Params::new();
        p.push_opt("id", self.id);
        p.push_opt("clientId", self.client_id);
        p.push_opt("creatorId", self.creator_id);
        p.push_opt("expertId", self.expert_id);
        p.push_opt("auto", self.auto.as_deref());
        p.push_opt("number", self.number.as_deref());
        p.push_opt("orderPickingId", self.order_picking_id);
        p.push_opt_csv("positionStatuses", self.position_statuses.as_deref());
        p.push_opt("positionType", self.position_type);
        p.push_opt("positionAuto", self.position_auto.as_deref());
        p.push_opt_csv("tagIds", self.tag_ids.as_deref());
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt("skip", self.skip);
        p.push_opt("limit", self.limit);
        p.push_opt("output", self.output.as_deref());
        p.push_opt("fields", fields);
        Ok(p)
    }
}

/// Filter for customer complaint position lists
/// (`customerComplaints/getPositions`).
#[derive(Debug, Clone, Default)]
pub struct ComplaintPositionsFilter {
    pub op_id: Option<i64>,
    pub order_picking_good_id: Option<i64>,
    pub order_picking_good_ids: Option<Vec<i64>>,
    pub picking_ids: Option<Vec<i64>>,
    pub old_co_position_ids: Option<Vec<i64>>,
    pub client_id: Option<i64>,
    pub item_id: Option<i64>,
    pub tag_ids: Option<Vec<i64>>,
    pub loc_id: Option<i64>,
    /// 1..=8
    pub status: Option<i64>,
    /// 1..=3
    pub r#type: Option<i64>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// `status` or `createDate`
    pub sort: Option<String>,
    pub output: Option<String>,
    pub fields: Option<Vec<String>>,
}

impl ComplaintPositionsFilter {
    pub(crate) fn params(&self, allowed_fields: &[&str]) -> Result<Params> {
        check_limit(self.limit)?;
        check_one_of("sort", self.sort.as_deref(), &["status", "createDate"])?;
        check_range("status", self.status, 1..=8)?;
        check_range("type", self.r#type, 1..=3)?;
        let fields = self
            .fields
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect::<Vec<_>>());
        let fields =
            check_fields(fields.as_deref(), allowed_fields)?;
        let mut p = Params::new();
        p.push_opt("opId", self.op_id);
        p.push_opt("orderPickingGoodId", self.order_picking_good_id);
        p.push_opt_csv("orderPickingGoodIds", self.order_picking_good_ids.as_deref());
        p.push_opt_csv("pickingIds", self.picking_ids.as_deref());
        p.push_opt_csv("oldCoPositionIds", self.old_co_position_ids.as_deref());
        p.push_opt("clientId", self.client_id);
        p.push_opt("itemId", self.item_id);
        p.push_opt_csv("tagIds", self.tag_ids.as_deref());
        p.push_opt("locId", self.loc_id);
        p.push_opt("status", self.status);
        p.push_opt("type", self.r#type);
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt("skip", self.skip);
        p.push_opt("limit", self.limit);
        p.push_opt("sort", self.sort.as_deref());
        p.push_opt("output", self.output.as_deref());
        p.push_opt("fields", fields);
        Ok(p)
    }
}

/// Filter for order lists in the trade stock family (`ts/orders/list`).
#[derive(Debug, Clone, Default)]
pub struct TsOrdersFilter {
    pub number: Option<String>,
    pub agreement_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub delivery_id: Option<i64>,
    pub brand: Option<String>,
    pub message: Option<String>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub update_date_start: Option<DateTimeArg>,
    pub update_date_end: Option<DateTimeArg>,
    pub deadline_date_start: Option<DateTimeArg>,
    pub deadline_date_end: Option<DateTimeArg>,
    pub order_ids: Option<Vec<i64>>,
    pub product_ids: Option<Vec<i64>>,
    pub position_statuses: Option<Vec<i64>>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl TsOrdersFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_limit(self.limit)?;
        let mut p = Params::new();
        p.push_opt("number", self.number.as_deref());
        p.push_opt("agreementId", self.agreement_id);
        p.push_opt("managerId", self.manager_id);
        p.push_opt("deliveryId", self.delivery_id);
        p.push_opt("brand", self.brand.as_deref());
        p.push_opt("message", self.message.as_deref());
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt(
            "updateDateStart",
            self.update_date_start.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "updateDateEnd",
            self.update_date_end.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "deadlineDateStart",
            self.deadline_date_start.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "deadlineDateEnd",
            self.deadline_date_end.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt_csv("orderIds", self.order_ids.as_deref());
        p.push_opt_csv("productIds", self.product_ids.as_deref());
        p.push_opt_csv("positionStatuses", self.position_statuses.as_deref());
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        Ok(p)
    }
}

/// Position status names accepted by the positions list filters.
pub(crate) const POSITION_STATUSES: &[&str] = &[
    "prepayment",
    "canceled",
    "new",
    "supOrder",
    "supOrderCanceled",
    "reservation",
    "orderPicking",
    "delivery",
    "finished",
];

/// Filter for `GET ts/positions/list` (the client view).
#[derive(Debug, Clone, Default)]
pub struct TsPositionsFilter {
    pub brand: Option<String>,
    pub message: Option<String>,
    pub agreement_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub no_manager_assigned: Option<bool>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub update_date_start: Option<DateTimeArg>,
    pub update_date_end: Option<DateTimeArg>,
    pub deadline_date_start: Option<DateTimeArg>,
    pub deadline_date_end: Option<DateTimeArg>,
    pub route_ids: Option<Vec<i64>>,
    pub distributor_ids: Option<Vec<i64>>,
    pub ids: Option<Vec<i64>>,
    pub order_ids: Option<Vec<i64>>,
    pub product_ids: Option<Vec<i64>>,
    pub statuses: Option<Vec<String>>,
    pub tag_ids: Option<Vec<i64>>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    pub additional_info: Option<Vec<String>>,
}

impl TsPositionsFilter {
    pub(crate) fn params(&self, allowed_info: &[&str]) -> Result<Params> {
        check_limit(self.limit)?;
        if let Some(statuses) = &self.statuses {
            for s in statuses {
                check_one_of("statuses", Some(s.as_str()), POSITION_STATUSES)?;
            }
        }
        let info = self
            .additional_info
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect::<Vec<_>>());
        let info = check_fields(info.as_deref(), allowed_info)?;
        let mut p = Params::new();
        p.push_opt("brand", self.brand.as_deref());
        p.push_opt("message", self.message.as_deref());
        p.push_opt("agreementId", self.agreement_id);
        p.push_opt("managerId", self.manager_id);
        p.push_opt_bool_str("noManagerAssigned", self.no_manager_assigned);
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt(
            "updateDateStart",
            self.update_date_start.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "updateDateEnd",
            self.update_date_end.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "deadlineDateStart",
            self.deadline_date_start.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "deadlineDateEnd",
            self.deadline_date_end.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt_csv("routeIds", self.route_ids.as_deref());
        p.push_opt_csv("distributorIds", self.distributor_ids.as_deref());
        p.push_opt_csv("ids", self.ids.as_deref());
        p.push_opt_csv("orderIds", self.order_ids.as_deref());
        p.push_opt_csv("productIds", self.product_ids.as_deref());
        p.push_opt_csv("statuses", self.statuses.as_deref());
        p.push_opt_csv("tagIds", self.tag_ids.as_deref());
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        p.push_opt("additionalInfo", info);
        Ok(p)
    }
}

/// Filter for `POST cp/ts/positions/list` (the administrative view). This
/// endpoint takes its dates in the `cp` format, unlike the rest of the family.
#[derive(Debug, Clone, Default)]
pub struct AdminPositionsFilter {
    pub brand: Option<String>,
    pub message: Option<String>,
    pub agreement_id: Option<i64>,
    pub client_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub no_manager_assigned: Option<bool>,
    pub delivery_id: Option<i64>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub update_date_start: Option<DateTimeArg>,
    pub update_date_end: Option<DateTimeArg>,
    pub deadline_date_start: Option<DateTimeArg>,
    pub deadline_date_end: Option<DateTimeArg>,
    pub order_picking_date_start: Option<DateTimeArg>,
    pub order_picking_date_end: Option<DateTimeArg>,
    pub order_picking_good_ids: Option<Vec<i64>>,
    pub customer_complaint_position_ids: Option<Vec<i64>>,
    pub so_position_ids: Option<Vec<i64>>,
    pub route_ids: Option<Vec<i64>>,
    pub distributor_ids: Option<Vec<i64>>,
    pub ids: Option<Vec<i64>>,
    pub order_ids: Option<Vec<i64>>,
    pub product_ids: Option<Vec<i64>>,
    pub statuses: Option<Vec<String>>,
    pub tag_ids: Option<Vec<i64>>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl AdminPositionsFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_limit(self.limit)?;
        if let Some(statuses) = &self.statuses {
            for s in statuses {
                check_one_of("statuses", Some(s.as_str()), POSITION_STATUSES)?;
            }
        }
        let mut p = Params::new();
        p.push_opt("brand", self.brand.as_deref());
        p.push_opt("message", self.message.as_deref());
        p.push_opt("agreementId", self.agreement_id);
        p.push_opt("clientId", self.client_id);
        p.push_opt("managerId", self.manager_id);
        p.push_opt_bool_str("noManagerAssigned", self.no_manager_assigned);
        p.push_opt("deliveryId", self.delivery_id);
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_cp()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_cp()));
        p.push_opt(
            "updateDateStart",
            self.update_date_start.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "updateDateEnd",
            self.update_date_end.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "deadlineDateStart",
            self.deadline_date_start.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "deadlineDateEnd",
            self.deadline_date_end.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "orderPickingDateStart",
            self.order_picking_date_start.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt(
            "orderPickingDateEnd",
            self.order_picking_date_end.as_ref().map(|d| d.to_cp()),
        );
        p.push_opt_csv("orderPickingGoodIds", self.order_picking_good_ids.as_deref());
        p.push_opt_csv(
            "customerComplaintPositionIds",
            self.customer_complaint_position_ids.as_deref(),
        );
        p.push_opt_csv("soPositionIds", self.so_position_ids.as_deref());
        p.push_opt_csv("routeIds", self.route_ids.as_deref());
        p.push_opt_csv("distributorIds", self.distributor_ids.as_deref());
        p.push_opt_csv("ids", self.ids.as_deref());
        p.push_opt_csv("orderIds", self.order_ids.as_deref());
        p.push_opt_csv("productIds", self.product_ids.as_deref());
        p.push_opt_csv("statuses", self.statuses.as_deref());
        p.push_opt_csv("tagIds", self.tag_ids.as_deref());
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        Ok(p)
    }
}

/// Payment states accepted by [`TsPaymentsFilter`].
pub(crate) const PAYMENT_STATUSES: &[&str] =
    &["new", "inProcess", "accepted", "rejected", "canceled"];

/// Filter for `GET cp/ts/payments/list`.
#[derive(Debug, Clone, Default)]
pub struct TsPaymentsFilter {
    pub contractor_id: Option<i64>,
    pub agreement_id: Option<i64>,
    pub amount_start: Option<Decimal>,
    pub amount_end: Option<Decimal>,
    pub status: Option<Vec<String>>,
    pub number: Option<String>,
    pub requisite_id: Option<i64>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub payment_type: Option<Vec<String>>,
    pub payment_method_ids: Option<Vec<i64>>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub fields: Option<Vec<String>>,
}

impl TsPaymentsFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_limit(self.limit)?;
        if let Some(statuses) = &self.status {
            for s in statuses {
                check_one_of("status", Some(s.as_str()), PAYMENT_STATUSES)?;
            }
        }
        let mut p = Params::new();
        p.push_opt("contractorId", self.contractor_id);
        p.push_opt("agreementId", self.agreement_id);
        p.push_opt("amountStart", self.amount_start);
        p.push_opt("amountEnd", self.amount_end);
        p.push_opt_csv("status", self.status.as_deref());
        p.push_opt("number", self.number.as_deref());
        p.push_opt("requisiteId", self.requisite_id);
        p.push_opt("skip", self.skip);
        p.push_opt("limit", self.limit);
        p.push_opt_csv("paymentType", self.payment_type.as_deref());
        p.push_opt_csv("paymentMethodIds", self.payment_method_ids.as_deref());
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt_csv("fields", self.fields.as_deref());
        Ok(p)
    }
}

/// Filter for `GET ts/agreements/list` / `GET cp/ts/agreements/list`, which
/// share one parameter set.
#[derive(Debug, Clone, Default)]
pub struct AgreementsFilter {
    pub contractor_ids: Option<Vec<i64>>,
    pub contractor_requisite_ids: Option<Vec<i64>>,
    pub shop_requisite_ids: Option<Vec<i64>>,
    pub is_active: Option<bool>,
    pub is_delete: Option<bool>,
    pub is_default: Option<bool>,
    pub agreement_type: Option<i32>,
    pub relation_type: Option<i32>,
    pub number: Option<String>,
    pub currency: Option<String>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub credit_limit: Option<Decimal>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl AgreementsFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_limit(self.limit)?;
        let mut p = Params::new();
        p.push_opt_csv("contractorIds", self.contractor_ids.as_deref());
        p.push_opt_csv(
            "contractorRequisiteIds",
            self.contractor_requisite_ids.as_deref(),
        );
        p.push_opt_csv("shopRequisiteIds", self.shop_requisite_ids.as_deref());
        p.push_opt_bool_str("isActive", self.is_active);
        p.push_opt_bool_str("isDelete", self.is_delete);
        p.push_opt_bool_str("isDefault", self.is_default);
        p.push_opt("agreementType", self.agreement_type);
        p.push_opt("relationType", self.relation_type);
        p.push_opt("number", self.number.as_deref());
        p.push_opt("currency", self.currency.as_deref());
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt("creditLimit", self.credit_limit);
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        Ok(p)
    }
}

/// Filter for `POST cp/ts/supplierOrders/orders/list`.
#[derive(Debug, Clone, Default)]
pub struct SupplierOrdersFilter {
    pub orders_ids: Option<Vec<i64>>,
    pub distributor_ids: Option<Vec<i64>>,
    pub supplier_ids: Option<Vec<i64>>,
    pub send_statuses: Option<Vec<i64>>,
    pub create_date_start: Option<DateTimeArg>,
    pub create_date_end: Option<DateTimeArg>,
    pub send_date_start: Option<DateTimeArg>,
    pub send_date_end: Option<DateTimeArg>,
    pub client_order_id: Option<i64>,
    pub client_order_number: Option<String>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl SupplierOrdersFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_limit(self.limit)?;
        let mut p = Params::new();
        p.push_opt_csv("ordersIds", self.orders_ids.as_deref());
        p.push_opt_csv("distributorIds", self.distributor_ids.as_deref());
        p.push_opt_csv("supplierIds", self.supplier_ids.as_deref());
        p.push_opt_csv("sendStatuses", self.send_statuses.as_deref());
        p.push_opt(
            "createDateStart",
            self.create_date_start.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "createDateEnd",
            self.create_date_end.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "sendDateStart",
            self.send_date_start.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "sendDateEnd",
            self.send_date_end.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt("clientOrderId", self.client_order_id);
        p.push_opt("clientOrderNumber", self.client_order_number.as_deref());
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        Ok(p)
    }
}

/// Filter for `POST cp/ts/supplierOrders/positions/list`.
#[derive(Debug, Clone, Default)]
pub struct SupplierOrderPositionsFilter {
    pub statuses: Option<Vec<i64>>,
    pub order_id: Option<i64>,
    pub distributor_ids: Option<Vec<i64>>,
    pub supplier_ids: Option<Vec<i64>>,
    pub position_ids: Option<Vec<i64>>,
    pub gr_position_ids: Option<Vec<i64>>,
    pub client_order_id: Option<i64>,
    pub client_order_number: Option<String>,
    pub without_order: Option<bool>,
    pub with_order: Option<bool>,
    pub additional_info: Option<Vec<String>>,
    pub deadline_date_start: Option<DateTimeArg>,
    pub deadline_date_end: Option<DateTimeArg>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl SupplierOrderPositionsFilter {
    pub(crate) fn params(&self) -> Result<Params> {
        check_limit(self.limit)?;
        let info = self
            .additional_info
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect::<Vec<_>>());
        let info = check_fields(
            info.as_deref(),
            &["items", "goodsReceipt"],
        )?;
        let mut p = Params::new();
        p.push_opt_csv("statuses", self.statuses.as_deref());
        p.push_opt("orderId", self.order_id);
        p.push_opt_csv("distributorIds", self.distributor_ids.as_deref());
        p.push_opt_csv("supplierIds", self.supplier_ids.as_deref());
        p.push_opt_csv("positionIds", self.position_ids.as_deref());
        p.push_opt_csv("grPositionIds", self.gr_position_ids.as_deref());
        p.push_opt("clientOrderId", self.client_order_id);
        p.push_opt("clientOrderNumber", self.client_order_number.as_deref());
        if let Some(v) = self.without_order {
            p.push("withoutOrder", if v { "1" } else { "0" });
        }
        if let Some(v) = self.with_order {
            p.push("withOrder", if v { "1" } else { "0" });
        }
        p.push_opt("additionalInfo", info);
        p.push_opt(
            "deadlineDateStart",
            self.deadline_date_start.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "deadlineDateEnd",
            self.deadline_date_end.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt("limit", self.limit);
        p.push_opt("skip", self.skip);
        Ok(p)
    }
}

/// Filter for supplier return operation lists
/// (`cp/ts/supplierReturns/operations/list` and `…/sum`).
#[derive(Debug, Clone, Default)]
pub struct SupplierReturnOperationsFilter {
    pub creator_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub goods_receipt_id: Option<i64>,
    pub agreement_ids: Option<Vec<i64>>,
    pub tag_ids: Option<Vec<i64>>,
    pub sbis_statuses: Option<Vec<String>>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub fields: Option<Vec<String>>,
}

impl SupplierReturnOperationsFilter {
    pub(crate) fn params(&self, allowed_fields: &[&str]) -> Result<Params> {
        check_limit(self.limit)?;
        let fields = self
            .fields
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect::<Vec<_>>());
        let fields =
            check_fields(fields.as_deref(), allowed_fields)?;
        let mut p = Params::new();
        p.push_opt("creatorId", self.creator_id);
        p.push_opt("supplierId", self.supplier_id);
        p.push_opt("goodsReceiptId", self.goods_receipt_id);
        p.push_opt_csv("agreementIds", self.agreement_ids.as_deref());
        p.push_opt_csv("tagIds", self.tag_ids.as_deref());
        p.push_opt_csv("sbisStatuses", self.sbis_statuses.as_deref());
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt("skip", self.skip);
        p.push_opt("limit", self.limit);
        p.push_opt("fields", fields);
        Ok(p)
    }
}

/// Filter for supplier return position lists
/// (`cp/ts/supplierReturns/positions/list` and `…/sum`).
#[derive(Debug, Clone, Default)]
pub struct SupplierReturnPositionsFilter {
    pub op_id: Option<i64>,
    pub status: Option<i64>,
    pub r#type: Option<i64>,
    pub goods_receipt_pos_ids: Option<Vec<i64>>,
    pub item_ids: Option<Vec<i64>>,
    pub supplier_id: Option<i64>,
    pub goods_receipt_ids: Option<Vec<i64>>,
    pub date_start: Option<DateTimeArg>,
    pub date_end: Option<DateTimeArg>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub fields: Option<Vec<String>>,
}

impl SupplierReturnPositionsFilter {
    pub(crate) fn params(&self, allowed_fields: &[&str]) -> Result<Params> {
        check_limit(self.limit)?;
        let fields = self
            .fields
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect::<Vec<_>>());
        let fields =
            check_fields(fields.as_deref(), allowed_fields)?;
        let mut p = Params::new();
        p.push_opt("opId", self.op_id);
        p.push_opt("status", self.status);
        p.push_opt("type", self.r#type);
        p.push_opt_csv("goodsReceiptPosIds", self.goods_receipt_pos_ids.as_deref());
        p.push_opt_csv("itemIds", self.item_ids.as_deref());
        p.push_opt("supplierId", self.supplier_id);
        p.push_opt_csv("goodsReceiptIds", self.goods_receipt_ids.as_deref());
        p.push_opt("dateStart", self.date_start.as_ref().map(|d| d.to_ts()));
        p.push_opt("dateEnd", self.date_end.as_ref().map(|d| d.to_ts()));
        p.push_opt("skip", self.skip);
        p.push_opt("limit", self.limit);
        p.push_opt("fields", fields);
        Ok(p)
    }
}

/// Good receipt position payload, shared by create and update
/// (`cp/ts/goodReceipts/createPosition` / `…/updatePosition`).
#[derive(Debug, Clone, Default)]
pub struct GrPositionData {
    pub brand: String,
    pub number: String,
    pub quantity: f64,
    pub sup_buy_price: Decimal,
    /// Three-letter country code
    pub manufacturer_country: Option<String>,
    pub gtd: Option<String>,
    pub warranty_period: Option<i64>,
    pub return_period: Option<i64>,
    pub barcodes: Option<Vec<String>>,
    pub comment: Option<String>,
    pub descr: Option<String>,
    pub expected_quantity: Option<f64>,
    pub so_position_id: Option<i64>,
    pub old_order_position_id: Option<i64>,
}

impl GrPositionData {
    pub(crate) fn fill(&self, p: &mut Params) -> Result<()> {
        if let Some(country) = &self.manufacturer_country {
            if country.len() != 3 {
                return Err(AbcpError::wrong_parameter(
                    "manufacturerCountry",
                    "must be a three-letter code",
                ));
            }
        }
        p.push("brand", &self.brand);
        p.push("number", &self.number);
        p.push("quantity", self.quantity);
        p.push("supBuyPrice", self.sup_buy_price);
        p.push_opt("manufacturerCountry", self.manufacturer_country.as_deref());
        p.push_opt("gtd", self.gtd.as_deref());
        p.push_opt("warrantyPeriod", self.warranty_period);
        p.push_opt("returnPeriod", self.return_period);
        // Barcodes travel space separated in a single field.
        p.push_opt("barcodes", self.barcodes.as_ref().map(|b| b.join(" ")));
        p.push_opt("comment", self.comment.as_deref());
        p.push_opt("descr", self.descr.as_deref());
        p.push_opt("expectedQuantity", self.expected_quantity);
        p.push_opt("soPositionId", self.so_position_id);
        p.push_opt("oldOrderPositionId", self.old_order_position_id);
        Ok(())
    }
}

/// Order-from-cart payload for `POST cp/ts/orders/createByCart` (the
/// administrative variant, which carries more delivery detail than the
/// client one).
#[derive(Debug, Clone, Default)]
pub struct AdminCartOrder {
    pub client_id: i64,
    pub agreement_id: i64,
    /// Cart position ids to turn into an order
    pub positions: Vec<i64>,
    pub delivery_address: String,
    pub delivery_person: String,
    pub delivery_contact: String,
    pub number: Option<String>,
    pub create_time: Option<DateTimeArg>,
    pub manager_id: Option<i64>,
    pub delivery_method_id: Option<i64>,
    pub delivery_comment: Option<String>,
    pub delivery_employee_person: Option<String>,
    pub delivery_employee_contact: Option<String>,
    pub delivery_reseller_comment: Option<String>,
    pub delivery_start_time: Option<DateTimeArg>,
    pub delivery_end_time: Option<DateTimeArg>,
    pub locale: Option<String>,
    pub fields: Option<Vec<String>>,
}

impl AdminCartOrder {
    pub fn new(
        client_id: i64,
        agreement_id: i64,
        positions: Vec<i64>,
        delivery_address: impl Into<String>,
        delivery_person: impl Into<String>,
        delivery_contact: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            agreement_id,
            positions,
            delivery_address: delivery_address.into(),
            delivery_person: delivery_person.into(),
            delivery_contact: delivery_contact.into(),
            ..Default::default()
        }
    }

    pub(crate) fn params(&self, allowed_fields: &[&str]) -> Result<Params> {
        let fields = self
            .fields
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect::<Vec<_>>());
        let fields =
            check_fields(fields.as_deref(), allowed_fields)?;
        let mut p = Params::new();
        p.push("clientId", self.client_id);
        p.push("agreementId", self.agreement_id);
        p.push_opt_csv("positions", Some(self.positions.as_slice()));
        p.push("deliveryAddress", &self.delivery_address);
        p.push("deliveryPerson", &self.delivery_person);
        p.push("deliveryContact", &self.delivery_contact);
        p.push_opt("number", self.number.as_deref());
        p.push_opt("createTime", self.create_time.as_ref().map(|d| d.to_ts()));
        p.push_opt("managerId", self.manager_id);
        p.push_opt("deliveryMethodId", self.delivery_method_id);
        p.push_opt("deliveryComment", self.delivery_comment.as_deref());
        p.push_opt(
            "deliveryEmployeePerson",
            self.delivery_employee_person.as_deref(),
        );
        p.push_opt(
            "deliveryEmployeeContact",
            self.delivery_employee_contact.as_deref(),
        );
        p.push_opt(
            "deliveryResellerComment",
            self.delivery_reseller_comment.as_deref(),
        );
        p.push_opt(
            "deliveryStartTime",
            self.delivery_start_time.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt(
            "deliveryEndTime",
            self.delivery_end_time.as_ref().map(|d| d.to_ts()),
        );
        p.push_opt("locale", self.locale.as_deref());
        p.push_opt("fields", fields);
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn has(p: &Params, key: &str, value: &str) -> bool {
        p.pairs().iter().any(|(k, v)| k == key && v == value)
    }

    #[test]
    fn test_save_order_requires_number() {
        let order = SaveOrder::default();
        assert!(matches!(
            order.params(),
            Err(AbcpError::ParameterRequired(_))
        ));
    }

    #[test]
    fn test_save_order_note_keys() {
        let mut order = SaveOrder {
            number: Some("1042".into()),
            note: Some("call before shipping".into()),
            ..Default::default()
        };
        let p = order.params().unwrap();
        assert!(has(&p, "order[number]", "1042"));
        assert!(has(&p, "order[notes][0][value]", "call before shipping"));

        order.note = None;
        order.del_note = Some(7);
        let p = order.params().unwrap();
        assert!(has(&p, "order[notes][0][value]", ""));
        assert!(has(&p, "order[notes][0][id]", "7"));
    }

    #[test]
    fn test_save_order_delivery_dependencies() {
        let order = SaveOrder {
            number: Some("1042".into()),
            delivery_address_id: Some(-1),
            delivery_type_id: Some(2),
            ..Default::default()
        };
        // New address id without the address text itself.
        assert!(order.params().is_err());

        let order = SaveOrder {
            number: Some("1042".into()),
            delivery_cost: Some(Decimal::new(35000, 2)),
            ..Default::default()
        };
        assert!(order.params().is_err());
    }

    #[test]
    fn test_orders_list_filter_cp_dates_and_lists() {
        let filter = OrdersListFilter {
            date_created_start: Some(
                NaiveDate::from_ymd_opt(2024, 3, 5)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .into(),
            ),
            numbers: Some(vec!["1042".into(), "1043".into()]),
            ..Default::default()
        };
        let p = filter.params().unwrap();
        assert!(has(&p, "dateCreatedStart", "2024-03-05 00:00:00"));
        assert!(has(&p, "numbers[0]", "1042"));
        assert!(has(&p, "numbers[1]", "1043"));
    }

    #[test]
    fn test_ts_orders_filter_csv_lists() {
        let filter = TsOrdersFilter {
            order_ids: Some(vec![5, 6, 7]),
            ..Default::default()
        };
        let p = filter.params().unwrap();
        assert!(has(&p, "orderIds", "5,6,7"));
    }

    #[test]
    fn test_ts_positions_filter_rejects_unknown_status() {
        let filter = TsPositionsFilter {
            statuses: Some(vec!["shipped".into()]),
            ..Default::default()
        };
        assert!(filter.params(&["delivery", "unpaidAmount"]).is_err());
    }

    #[test]
    fn test_payments_filter_status_whitelist() {
        let filter = TsPaymentsFilter {
            status: Some(vec!["accepted".into(), "new".into()]),
            ..Default::default()
        };
        let p = filter.params().unwrap();
        assert!(has(&p, "status", "accepted,new"));

        let filter = TsPaymentsFilter {
            status: Some(vec!["done".into()]),
            ..Default::default()
        };
        assert!(filter.params().is_err());
    }

    #[test]
    fn test_gr_position_country_code() {
        let mut data = GrPositionData {
            brand: "Febi".into(),
            number: "01089".into(),
            quantity: 4.0,
            sup_buy_price: Decimal::new(12550, 2),
            manufacturer_country: Some("DE".into()),
            ..Default::default()
        };
        let mut p = Params::new();
        assert!(data.fill(&mut p).is_err());

        data.manufacturer_country = Some("DEU".into());
        data.barcodes = Some(vec!["4027816010890".into(), "4027816010891".into()]);
        let mut p = Params::new();
        data.fill(&mut p).unwrap();
        assert!(has(&p, "manufacturerCountry", "DEU"));
        assert!(has(&p, "barcodes", "4027816010890 4027816010891"));
    }
}
