pub mod destination_grid;
pub mod inventory_modal;
pub mod messages_panel;
pub mod modal;
pub mod role_select;
pub mod status_panel;
