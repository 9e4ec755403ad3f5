/*
[INPUT]:  -
[OUTPUT]: Public request types
[POS]:    Type layer - structs carried by endpoint methods
[UPDATE]: When a request type is added
*/

pub mod requests;

pub use requests::{
    AdminCartOrder, AdminPositionsFilter, AgreementsFilter, ComplaintPositionsFilter,
    CreateUser, CustomerComplaintsFilter, EditUser, GoodReceiptsFilter, GrPositionData,
    OrderPickingsFilter, OrdersListFilter, ReceiptsFilter, RegisterUser, RouteUpdate,
    SaveOrder, SupplierOrderPositionsFilter, SupplierOrdersFilter,
    SupplierReturnOperationsFilter, SupplierReturnPositionsFilter, TsOrdersFilter,
    TsPaymentsFilter, TsPositionsFilter, UsersListFilter,
};
