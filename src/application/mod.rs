// Application layer - View state machines and the services that feed them
pub mod asset_api;
pub mod asset_collection;
pub mod asset_detail;
pub mod chart_type_selector;
pub mod dashboard_service;
pub mod layout_detail;
pub mod loadable;
pub mod view_events;
