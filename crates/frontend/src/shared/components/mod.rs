pub mod estado_badge;
pub mod sortable_header;
pub mod stat_card;
pub mod status_message;
