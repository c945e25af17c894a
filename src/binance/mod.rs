pub mod api;
pub mod exchange_info;
pub mod filters;
pub mod new;
pub mod object;
pub mod prices;
pub mod symbols;
pub mod trading;
