pub mod organization_unit;
pub mod unit_group;
pub mod unit_user;
